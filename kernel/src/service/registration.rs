use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        event::Event,
        id::{EventId, UserId},
        photo::{UploadPhoto, PHOTO_REFERENCE_MAX_LENGTH},
        registration::{
            command::{
                CreateRegistration, DeleteRegistration, UpdateAttendance, UpdatePhotoSubmission,
            },
            Registration,
        },
        user::Registrant,
    },
    repository::{
        event::EventRepository, photo::PhotoStorage, registration::RegistrationRepository,
        user::UserRepository,
    },
};

pub const PHOTO_FIELD: &str = "photoSubmission";

// ユーザーとイベントの参加登録に関する操作をまとめる
// 操作するユーザーは引数で受け取る。アクセストークンから特定したものを渡すこと
#[derive(new)]
pub struct RegistrationService {
    event_repository: Arc<dyn EventRepository>,
    user_repository: Arc<dyn UserRepository>,
    registration_repository: Arc<dyn RegistrationRepository>,
    photo_storage: Arc<dyn PhotoStorage>,
}

impl RegistrationService {
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, event_id: EventId, actor: UserId) -> AppResult<()> {
        self.ensure_event_exists(event_id).await?;
        self.registration_repository
            .create(CreateRegistration::new(event_id, actor))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn unregister(&self, event_id: EventId, actor: UserId) -> AppResult<()> {
        self.ensure_event_exists(event_id).await?;
        self.registration_repository
            .delete(DeleteRegistration::new(event_id, actor))
            .await
    }

    pub async fn registrants(&self, event_id: EventId) -> AppResult<Vec<Registrant>> {
        self.ensure_event_exists(event_id).await?;
        self.registration_repository.find_registrants(event_id).await
    }

    pub async fn registered_events(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                user_id
            )));
        }
        self.registration_repository
            .find_events_by_user_id(user_id)
            .await
    }

    // 出席は false → true の一方向のみ
    // 参加登録がない場合は NotFound ではなく BadRequest とする
    #[tracing::instrument(skip(self))]
    pub async fn mark_attendance(
        &self,
        event_id: EventId,
        actor: UserId,
    ) -> AppResult<Registration> {
        self.registration_repository
            .update_attendance(UpdateAttendance::new(event_id, actor))
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "イベント（{}）への参加登録がありません。",
                    event_id
                ))
            })
    }

    #[tracing::instrument(skip(self, photo), fields(size = photo.content.len()))]
    pub async fn upload_photo(
        &self,
        event_id: EventId,
        actor: UserId,
        photo: UploadPhoto,
    ) -> AppResult<Registration> {
        if self
            .registration_repository
            .find(event_id, actor)
            .await?
            .is_none()
        {
            return Err(registration_not_found(event_id));
        }

        if photo.content.is_empty() {
            return Err(AppError::invalid_field(
                PHOTO_FIELD,
                "空のファイルは提出できません。",
            ));
        }
        if !photo.is_image() {
            return Err(AppError::invalid_field(
                PHOTO_FIELD,
                "画像ファイルを指定してください。",
            ));
        }

        let reference = self.photo_storage.store(event_id, actor, photo).await?;
        if reference.len() > PHOTO_REFERENCE_MAX_LENGTH {
            return Err(AppError::invalid_field(
                PHOTO_FIELD,
                format!(
                    "保存先の参照は {} 文字以内である必要があります。",
                    PHOTO_REFERENCE_MAX_LENGTH
                ),
            ));
        }

        // 画像保存の間に登録が解除された場合も NotFound とする
        self.registration_repository
            .update_photo_submission(UpdatePhotoSubmission::new(event_id, actor, reference))
            .await?
            .ok_or_else(|| registration_not_found(event_id))
    }

    async fn ensure_event_exists(&self, event_id: EventId) -> AppResult<()> {
        match self.event_repository.find_by_id(event_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event_id
            ))),
        }
    }
}

fn registration_not_found(event_id: EventId) -> AppError {
    AppError::EntityNotFound(format!(
        "イベント（{}）への参加登録が見つかりませんでした。",
        event_id
    ))
}
