use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, user::command::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AuthorizedUser, JsonBody, PathParam},
    model::{
        event::EventsResponse,
        user::{
            CreateUserRequest, UpdateUserRequest, UpdateUserRequestWithUserId,
            UpdateUserRoleRequest, UpdateUserRoleRequestWithUserId, UserResponse,
        },
    },
};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;

    let registered_user = registry.user_repository().create(req.into()).await?;
    tracing::info!(user_id = %registered_user.user_id, "user registered");

    Ok((StatusCode::CREATED, Json(registered_user.into())))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn show_user(
    _user: AuthorizedUser,
    PathParam(user_id): PathParam<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_by_id(user_id)
        .await
        .and_then(|user| match user {
            Some(user) => Ok(Json(user.into())),
            None => Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                user_id
            ))),
        })
}

pub async fn update_user(
    _user: AuthorizedUser,
    PathParam(user_id): PathParam<UserId>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate(&())?;

    registry
        .user_repository()
        .update(UpdateUserRequestWithUserId::new(user_id, req).into())
        .await
        .map(|user| Json(user.into()))
}

pub async fn delete_user(
    _user: AuthorizedUser,
    PathParam(user_id): PathParam<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_repository()
        .delete(DeleteUser { user_id })
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

// ロールの変更は管理者のみ
pub async fn change_role(
    user: AuthorizedUser,
    PathParam(user_id): PathParam<UserId>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<UpdateUserRoleRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .user_repository()
        .update_role(UpdateUserRoleRequestWithUserId::new(user_id, req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_registered_events(
    PathParam(user_id): PathParam<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .registration_service()
        .registered_events(user_id)
        .await
        .map(EventsResponse::from)
        .map(Json)
}
