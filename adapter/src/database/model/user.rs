use std::str::FromStr;

use kernel::model::{
    id::UserId,
    role::Role,
    user::{Registrant, User},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
        } = value;
        Ok(User {
            user_id,
            user_name,
            email,
            role: Role::from_str(&role)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
        })
    }
}

// 参加登録者一覧の取得で使う型
#[derive(sqlx::FromRow)]
pub struct RegistrantRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<RegistrantRow> for Registrant {
    fn from(value: RegistrantRow) -> Self {
        let RegistrantRow {
            user_id,
            user_name,
            email,
        } = value;
        Registrant {
            user_id,
            user_name,
            email,
        }
    }
}
