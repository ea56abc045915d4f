use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        command::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};

use crate::database::{model::event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, EventRow>(
            r#"
                INSERT INTO events (event_id, title, datetime, reg_open_date, reg_close_date)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING event_id, title, datetime, reg_open_date, reg_close_date
            "#,
        )
        .bind(EventId::new())
        .bind(event.title)
        .bind(event.datetime)
        .bind(event.reg_open_date)
        .bind(event.reg_close_date)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Event::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        // 開催日時の新しい順に並べる
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, datetime, reg_open_date, reg_close_date
                FROM events
                ORDER BY datetime DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_in_registration_window(&self, now: DateTime<Utc>) -> AppResult<Vec<Event>> {
        // 境界の時刻ちょうどは受付期間に含めない
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, datetime, reg_open_date, reg_close_date
                FROM events
                WHERE reg_open_date < $1 AND reg_close_date > $1
                ORDER BY datetime DESC
            "#,
        )
        .bind(now)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, datetime, reg_open_date, reg_close_date
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Event::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        // 指定されなかった項目は COALESCE で現在の値を残す
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                UPDATE events
                SET
                    title = COALESCE($2, title),
                    datetime = COALESCE($3, datetime),
                    reg_open_date = COALESCE($4, reg_open_date),
                    reg_close_date = COALESCE($5, reg_close_date)
                WHERE event_id = $1
                RETURNING event_id, title, datetime, reg_open_date, reg_close_date
            "#,
        )
        .bind(event.event_id)
        .bind(event.title)
        .bind(event.datetime)
        .bind(event.reg_open_date)
        .bind(event.reg_close_date)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Event::from).ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            ))
        })
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        // 参加登録は外部キーの ON DELETE CASCADE で削除される
        let res = sqlx::query(
            r#"
                DELETE FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        }

        Ok(())
    }
}
