use kernel::model::{event::Event, id::EventId};
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub reg_open_date: DateTime<Utc>,
    pub reg_close_date: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        } = value;
        Event {
            event_id,
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        }
    }
}
