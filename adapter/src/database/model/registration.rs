use kernel::model::{
    id::{EventId, UserId},
    registration::Registration,
};
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct RegistrationRow {
    pub event_id: EventId,
    pub user_id: UserId,
    pub attendance: bool,
    pub photo_submission: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(value: RegistrationRow) -> Self {
        let RegistrationRow {
            event_id,
            user_id,
            attendance,
            photo_submission,
            created_at,
        } = value;
        Registration {
            event_id,
            user_id,
            attendance,
            photo_submission,
            registered_at: created_at,
        }
    }
}
