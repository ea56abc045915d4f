use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        command::{CreateUser, DeleteUser, UpdateUser, UpdateUserRole},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let hashed_password = hash_password(&event.password)?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING user_id, user_name, email, role
            "#,
        )
        .bind(UserId::new())
        .bind(event.user_name)
        .bind(event.email)
        .bind(hashed_password)
        .bind(Role::User.to_string())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(map_unique_email)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email, role
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(User::try_from)
        .transpose()
    }

    async fn update(&self, event: UpdateUser) -> AppResult<User> {
        // パスワードが指定された場合のみハッシュ化して更新する
        let hashed_password = event.password.as_deref().map(hash_password).transpose()?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                UPDATE users
                SET
                    user_name = COALESCE($2, user_name),
                    email = COALESCE($3, email),
                    password_hash = COALESCE($4, password_hash)
                WHERE user_id = $1
                RETURNING user_id, user_name, email, role
            "#,
        )
        .bind(event.user_id)
        .bind(event.user_name)
        .bind(event.email)
        .bind(hashed_password)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(map_unique_email)?;

        match row {
            Some(row) => User::try_from(row),
            None => Err(user_not_found(event.user_id)),
        }
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET role = $2
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(event.role.to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(user_not_found(event.user_id));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        // 参加登録は外部キーの ON DELETE CASCADE で削除される
        let res = sqlx::query(
            r#"
                DELETE FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(user_not_found(event.user_id));
        }

        Ok(())
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

fn user_not_found(user_id: UserId) -> AppError {
    AppError::EntityNotFound(format!("ユーザー（{}）が見つかりませんでした。", user_id))
}

// メールアドレスの一意制約違反は入力エラーとして返す
fn map_unique_email(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::invalid_field(
                "email",
                "このメールアドレスは既に登録されています。",
            );
        }
    }
    AppError::SpecificOperationError(e)
}
