use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{event::command::DeleteEvent, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AuthorizedUser, JsonBody, PathParam},
    model::event::{
        CreateEventRequest, EventResponse, EventsResponse, UpdateEventRequest,
        UpdateEventRequestWithId,
    },
};

pub async fn register_event(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    req.validate(&())?;

    registry
        .event_repository()
        .create(req.into())
        .await
        .map(|event| (StatusCode::CREATED, Json(event.into())))
}

// 開催日時の新しい順
pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

// 現在が参加受付期間内のイベント
pub async fn show_active_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_in_registration_window(Utc::now())
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event_id
            ))),
        })
}

pub async fn update_event(
    _user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    req.validate(&())?;

    let update_event = UpdateEventRequestWithId::new(event_id, req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|event| Json(event.into()))
}

pub async fn delete_event(
    _user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .event_repository()
        .delete(DeleteEvent { event_id })
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
