use crate::model::id::EventId;
use chrono::{DateTime, Utc};

pub mod command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub reg_open_date: DateTime<Utc>,
    pub reg_close_date: DateTime<Utc>,
}
