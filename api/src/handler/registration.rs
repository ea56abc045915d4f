use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use kernel::{
    model::{id::EventId, photo::UploadPhoto},
    service::registration::PHOTO_FIELD,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AuthorizedUser, PathParam},
    model::registration::{RegistrantsResponse, RegistrationResponse},
};

// 操作するユーザーは常にアクセストークンから特定したものを使う
pub async fn register(
    user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_service()
        .register(event_id, user.id())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn unregister(
    user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_service()
        .unregister(event_id, user.id())
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_registrants(
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrantsResponse>> {
    registry
        .registration_service()
        .registrants(event_id)
        .await
        .map(RegistrantsResponse::from)
        .map(Json)
}

pub async fn mark_attendance(
    user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    registry
        .registration_service()
        .mark_attendance(event_id, user.id())
        .await
        .map(|reg| (StatusCode::CREATED, Json(reg.into())))
}

pub async fn upload_photo(
    user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    let photo = read_photo_field(multipart).await?;

    registry
        .registration_service()
        .upload_photo(event_id, user.id(), photo)
        .await
        .map(|reg| (StatusCode::CREATED, Json(reg.into())))
}

// photoSubmission 以外のフィールドは読み飛ばす
async fn read_photo_field(mut multipart: Multipart) -> AppResult<UploadPhoto> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let is_photo = field
            .name()
            .is_some_and(|name| name.eq_ignore_ascii_case(PHOTO_FIELD));
        if !is_photo {
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return Ok(UploadPhoto::new(file_name, content_type, content.to_vec()));
    }

    Err(AppError::invalid_field(
        PHOTO_FIELD,
        "ファイルが添付されていません。",
    ))
}
