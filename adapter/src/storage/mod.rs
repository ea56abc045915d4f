use std::path::PathBuf;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{EventId, UserId},
    photo::UploadPhoto,
};
use kernel::repository::photo::PhotoStorage;
use shared::error::{AppError, AppResult};

// メディアルート配下の保存先ディレクトリ
const PHOTO_DIR: &str = "pic";

#[derive(new)]
pub struct LocalPhotoStorage {
    media_root: PathBuf,
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn store(
        &self,
        event_id: EventId,
        user_id: UserId,
        photo: UploadPhoto,
    ) -> AppResult<String> {
        // 元のファイル名は使わず、衝突しない名前を振る
        let stem = uuid::Uuid::new_v4().simple().to_string();
        let file_name = match photo.extension() {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        };

        let dir = self.media_root.join(PHOTO_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(AppError::StorageError)?;
        tokio::fs::write(dir.join(&file_name), &photo.content)
            .await
            .map_err(AppError::StorageError)?;

        let reference = format!("{PHOTO_DIR}/{file_name}");
        tracing::info!(%event_id, %user_id, %reference, "photo submission stored");
        Ok(reference)
    }
}
