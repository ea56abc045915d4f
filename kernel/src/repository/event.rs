use crate::model::{
    event::{
        command::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    // イベントを登録し、登録後の内容を返す
    async fn create(&self, event: CreateEvent) -> AppResult<Event>;
    // 開催日時の新しい順にすべてのイベントを取得する
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    // reg_open_date < now < reg_close_date のイベントを取得する
    async fn find_in_registration_window(&self, now: DateTime<Utc>) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn update(&self, event: UpdateEvent) -> AppResult<Event>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
}
