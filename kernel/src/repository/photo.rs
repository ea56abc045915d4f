use crate::model::{id::{EventId, UserId}, photo::UploadPhoto};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    // 画像を保存し、保存先の参照文字列を返す
    async fn store(
        &self,
        event_id: EventId,
        user_id: UserId,
        photo: UploadPhoto,
    ) -> AppResult<String>;
}
