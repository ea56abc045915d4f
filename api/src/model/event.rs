use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1, max = 200))]
    pub title: String,
    #[garde(skip)]
    pub datetime: DateTime<Utc>,
    #[garde(skip)]
    pub reg_open_date: DateTime<Utc>,
    #[garde(skip)]
    pub reg_close_date: DateTime<Utc>,
}

impl From<CreateEventRequest> for CreateEvent {
    fn from(value: CreateEventRequest) -> Self {
        let CreateEventRequest {
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        } = value;
        CreateEvent {
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        }
    }
}

// 部分更新用。省略した項目は変更しない
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[garde(skip)]
    pub datetime: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub reg_open_date: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub reg_close_date: Option<DateTime<Utc>>,
}

#[derive(new)]
pub struct UpdateEventRequestWithId(EventId, UpdateEventRequest);

impl From<UpdateEventRequestWithId> for UpdateEvent {
    fn from(value: UpdateEventRequestWithId) -> Self {
        let UpdateEventRequestWithId(
            event_id,
            UpdateEventRequest {
                title,
                datetime,
                reg_open_date,
                reg_close_date,
            },
        ) = value;
        UpdateEvent {
            event_id,
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub reg_open_date: DateTime<Utc>,
    pub reg_close_date: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        } = value;
        Self {
            id: event_id,
            title,
            datetime,
            reg_open_date,
            reg_close_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}
