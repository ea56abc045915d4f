use crate::model::{id::UserId, role::Role};

#[derive(Debug)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

// None のフィールドは更新しない
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug)]
pub struct DeleteUser {
    pub user_id: UserId,
}
