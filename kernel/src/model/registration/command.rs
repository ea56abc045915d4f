use crate::model::id::{EventId, UserId};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, new)]
pub struct DeleteRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, new)]
pub struct UpdateAttendance {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, new)]
pub struct UpdatePhotoSubmission {
    pub event_id: EventId,
    pub user_id: UserId,
    pub photo_submission: String,
}
