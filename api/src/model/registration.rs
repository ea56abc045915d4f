use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, UserId},
    registration::Registration,
    user::Registrant,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub event_id: EventId,
    pub user_id: UserId,
    pub attendance: bool,
    pub photo_submission: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            event_id,
            user_id,
            attendance,
            photo_submission,
            registered_at,
        } = value;
        Self {
            event_id,
            user_id,
            attendance,
            photo_submission,
            registered_at,
        }
    }
}

// 参加登録者は id・名前・メールアドレスのみを返す
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<Registrant> for RegistrantResponse {
    fn from(value: Registrant) -> Self {
        let Registrant {
            user_id,
            user_name,
            email,
        } = value;
        Self {
            id: user_id,
            name: user_name,
            email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantsResponse {
    pub items: Vec<RegistrantResponse>,
}

impl From<Vec<Registrant>> for RegistrantsResponse {
    fn from(value: Vec<Registrant>) -> Self {
        Self {
            items: value.into_iter().map(RegistrantResponse::from).collect(),
        }
    }
}
