use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::Event,
    id::{EventId, UserId},
    registration::{
        command::{
            CreateRegistration, DeleteRegistration, UpdateAttendance, UpdatePhotoSubmission,
        },
        Registration,
    },
    user::Registrant,
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{event::EventRow, registration::RegistrationRow, user::RegistrantRow},
    ConnectionPool,
};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<()> {
        // 主キー (event_id, user_id) が重複する場合は何もしない
        sqlx::query(
            r#"
                INSERT INTO event_registrations (event_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (event_id, user_id) DO NOTHING
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteRegistration) -> AppResult<()> {
        sqlx::query(
            r#"
                DELETE FROM event_registrations
                WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }

    async fn find(&self, event_id: EventId, user_id: UserId) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT event_id, user_id, attendance, photo_submission, created_at
                FROM event_registrations
                WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Registration::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update_attendance(
        &self,
        event: UpdateAttendance,
    ) -> AppResult<Option<Registration>> {
        // 存在確認と更新を 1 文で行う。該当行がなければ None
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                UPDATE event_registrations
                SET attendance = TRUE
                WHERE event_id = $1 AND user_id = $2
                RETURNING event_id, user_id, attendance, photo_submission, created_at
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Registration::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update_photo_submission(
        &self,
        event: UpdatePhotoSubmission,
    ) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                UPDATE event_registrations
                SET photo_submission = $3
                WHERE event_id = $1 AND user_id = $2
                RETURNING event_id, user_id, attendance, photo_submission, created_at
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(event.photo_submission)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Registration::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_registrants(&self, event_id: EventId) -> AppResult<Vec<Registrant>> {
        // 登録の古い順に並べる
        sqlx::query_as::<_, RegistrantRow>(
            r#"
                SELECT
                u.user_id,
                u.user_name,
                u.email
                FROM event_registrations AS r
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.event_id = $1
                ORDER BY r.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Registrant::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                e.event_id,
                e.title,
                e.datetime,
                e.reg_open_date,
                e.reg_close_date
                FROM event_registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                WHERE r.user_id = $1
                ORDER BY e.datetime DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}
