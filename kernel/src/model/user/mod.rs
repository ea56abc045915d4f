use crate::model::{id::UserId, role::Role};

pub mod command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// イベントの参加登録者一覧で公開する項目のみを持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}
