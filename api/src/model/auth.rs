use kernel::model::id::UserId;
use serde::{Deserialize, Serialize};

use super::user::RoleName;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// role で一般ユーザーと管理者ユーザーを区別する
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub user_id: UserId,
    pub role: RoleName,
    pub access_token: String,
}
