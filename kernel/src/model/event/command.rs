use crate::model::id::EventId;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct CreateEvent {
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub reg_open_date: DateTime<Utc>,
    pub reg_close_date: DateTime<Utc>,
}

// 部分更新。None のフィールドは現在の値を維持する
#[derive(Debug, Default)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub reg_open_date: Option<DateTime<Utc>>,
    pub reg_close_date: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
}
