use crate::model::{
    event::Event,
    id::{EventId, UserId},
    registration::{
        command::{
            CreateRegistration, DeleteRegistration, UpdateAttendance, UpdatePhotoSubmission,
        },
        Registration,
    },
    user::Registrant,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // 既に登録済みの場合は何もしない
    async fn create(&self, event: CreateRegistration) -> AppResult<()>;
    // 登録が存在しない場合は何もしない
    async fn delete(&self, event: DeleteRegistration) -> AppResult<()>;
    async fn find(&self, event_id: EventId, user_id: UserId) -> AppResult<Option<Registration>>;
    // 登録が存在しない場合は None を返す
    async fn update_attendance(&self, event: UpdateAttendance)
        -> AppResult<Option<Registration>>;
    // 登録が存在しない場合は None を返す
    async fn update_photo_submission(
        &self,
        event: UpdatePhotoSubmission,
    ) -> AppResult<Option<Registration>>;
    async fn find_registrants(&self, event_id: EventId) -> AppResult<Vec<Registrant>>;
    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Event>>;
}
