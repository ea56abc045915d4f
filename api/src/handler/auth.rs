use axum::{extract::State, http::StatusCode, Json};
use kernel::model::auth::command::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AuthorizedUser, JsonBody},
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        user::RoleName,
    },
};

pub async fn login(
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let user_id = registry
        .auth_repository()
        .verify_user(&req.email, &req.password)
        .await?;
    let user = registry
        .user_repository()
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    tracing::info!(%user_id, "user logged in");

    Ok(Json(AccessTokenResponse {
        user_id,
        role: RoleName::from(user.role),
        access_token: access_token.0,
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
