use crate::model::id::{EventId, UserId};
use chrono::{DateTime, Utc};

pub mod command;

// ユーザーとイベントを結ぶ参加登録
// (event_id, user_id) の組につき高々 1 件のみ存在する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub attendance: bool,
    pub photo_submission: Option<String>,
    pub registered_at: DateTime<Utc>,
}
