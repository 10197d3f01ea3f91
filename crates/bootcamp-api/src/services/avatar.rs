//! Profile picture pipeline
//!
//! Two steps per user: an upload lands in a temporary slot (downsized to
//! [`UPLOAD_MAX_WIDTH`]), then a crop of that temporary picture becomes the
//! avatar and the temporary file is removed. Both steps hold the user's lock,
//! and decode/resize/encode run on the blocking pool.

use crate::services::locks::UserLocks;
use bootcamp_core::constants::{
    avatar_key, temp_picture_key, AVATAR_MAX_SIZE, PROFILE_PICTURES_DIR, UPLOAD_MAX_WIDTH,
};
use bootcamp_core::Config;
use bootcamp_processing::{CropRect, ImageProcessor, PictureSize, ProcessingError};
use bootcamp_storage::{Storage, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncRead;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("upload has no 'picture' field")]
    MissingPicture,

    #[error("upload could not be read: {0}")]
    Upload(String),

    #[error("invalid crop: {0}")]
    InvalidCrop(String),

    #[error("no uploaded picture to crop")]
    TempNotFound,

    #[error("picture could not be decoded: {0}")]
    Decode(String),

    #[error("picture could not be processed: {0}")]
    Processing(String),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl AvatarError {
    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AvatarError::MissingPicture => "missing_picture",
            AvatarError::Upload(_) => "upload",
            AvatarError::InvalidCrop(_) => "invalid_crop",
            AvatarError::TempNotFound => "temp_not_found",
            AvatarError::Decode(_) => "decode",
            AvatarError::Processing(_) => "processing",
            AvatarError::Storage(_) => "storage",
        }
    }
}

impl From<ProcessingError> for AvatarError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Decode(msg) => AvatarError::Decode(msg),
            ProcessingError::InvalidCrop(msg) => AvatarError::InvalidCrop(msg),
            ProcessingError::Encode(msg) => AvatarError::Processing(msg),
        }
    }
}

#[derive(Clone)]
pub struct AvatarService {
    storage: Arc<dyn Storage>,
    locks: UserLocks,
    config: Config,
}

impl AvatarService {
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self {
            storage,
            locks: UserLocks::new(),
            config: config.clone(),
        }
    }

    /// Write a fresh upload into the user's temporary slot, shrinking it to
    /// the upload width cap. Returns the size of the stored picture.
    ///
    /// The raw bytes are stored before decoding; if they turn out not to be a
    /// picture they stay in the slot until the next upload replaces them.
    #[tracing::instrument(skip(self, reader), fields(operation = "upload_picture"))]
    pub async fn store_upload(
        &self,
        username: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<PictureSize, AvatarError> {
        let _guard = self.locks.lock(username).await;
        let temp_key = temp_picture_key(username);

        self.storage.ensure_dir(PROFILE_PICTURES_DIR).await?;
        let written = self.storage.put_stream(&temp_key, reader).await?;
        let data = self.storage.get(&temp_key).await?;

        let capped =
            tokio::task::spawn_blocking(move || ImageProcessor::cap_width(&data, UPLOAD_MAX_WIDTH))
                .await
                .map_err(|e| AvatarError::Processing(format!("image task failed: {}", e)))??;

        if let Some(resized) = capped.resized {
            self.storage.put(&temp_key, resized).await?;
        }

        tracing::info!(
            username = %username,
            size_bytes = written,
            original_width = capped.original.width,
            original_height = capped.original.height,
            width = capped.size.width,
            height = capped.size.height,
            "Profile picture uploaded"
        );

        Ok(capped.size)
    }

    /// Crop the temporary picture into the user's avatar and drop the
    /// temporary file. On failure the temporary file is kept for a retry.
    #[tracing::instrument(skip(self), fields(operation = "crop_picture"))]
    pub async fn crop(&self, username: &str, rect: CropRect) -> Result<(), AvatarError> {
        let _guard = self.locks.lock(username).await;
        let temp_key = temp_picture_key(username);

        let data = match self.storage.get(&temp_key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Err(AvatarError::TempNotFound),
            Err(e) => return Err(e.into()),
        };

        let avatar = tokio::task::spawn_blocking(move || {
            ImageProcessor::crop_to_avatar(&data, rect, AVATAR_MAX_SIZE)
        })
        .await
        .map_err(|e| AvatarError::Processing(format!("image task failed: {}", e)))??;

        self.storage.put(&avatar_key(username), avatar).await?;
        self.storage.delete(&temp_key).await?;

        tracing::info!(
            username = %username,
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            "Avatar saved"
        );

        Ok(())
    }

    /// Public URL of the user's avatar, or the default picture when none exists.
    pub async fn picture_url(&self, username: &str) -> String {
        let key = avatar_key(username);
        match self.storage.exists(&key).await {
            Ok(true) => self.config.media_url_for(&key),
            Ok(false) => self.config.default_avatar_url.clone(),
            Err(e) => {
                tracing::warn!(error = %e, username = %username, "Could not check avatar");
                self.config.default_avatar_url.clone()
            }
        }
    }

    /// Public URL of the user's temporary upload.
    pub fn temp_picture_url(&self, username: &str) -> String {
        self.config.media_url_for(&temp_picture_key(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootcamp_storage::LocalStorage;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(media_root: PathBuf) -> Config {
        Config {
            server_port: 0,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            media_root,
            media_url: "/media/".to_string(),
            default_avatar_url: "/static/img/user.png".to_string(),
            database_url: None,
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: "x".repeat(32),
            jwt_expiry_hours: 1,
            max_picture_size_bytes: 1024 * 1024,
            seed_account: None,
        }
    }

    async fn service() -> (AvatarService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let service = AvatarService::new(Arc::new(storage), &config(dir.path().to_path_buf()));
        (service, dir)
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn rect(x: u32, y: u32, width: u32, height: u32) -> CropRect {
        CropRect {
            x,
            y,
            width,
            height,
        }
    }

    #[tokio::test]
    async fn test_upload_then_crop() {
        let (avatars, dir) = service().await;

        let mut reader = Cursor::new(png(700, 500));
        let size = avatars.store_upload("alice", &mut reader).await.unwrap();
        assert_eq!(size, PictureSize::new(350, 250));

        let temp = dir.path().join("profile_pictures/alice_tmp.jpg");
        let stored = std::fs::read(&temp).unwrap();
        assert_eq!(
            ImageProcessor::dimensions(&stored).unwrap(),
            PictureSize::new(350, 250)
        );

        avatars.crop("alice", rect(0, 0, 350, 250)).await.unwrap();
        assert!(!temp.exists());

        let avatar = std::fs::read(dir.path().join("profile_pictures/alice.jpg")).unwrap();
        assert_eq!(
            ImageProcessor::dimensions(&avatar).unwrap(),
            PictureSize::new(200, 143)
        );
        assert_eq!(
            avatars.picture_url("alice").await,
            "/media/profile_pictures/alice.jpg"
        );
    }

    #[tokio::test]
    async fn test_narrow_upload_stored_verbatim() {
        let (avatars, dir) = service().await;
        let original = png(120, 80);

        let mut reader = Cursor::new(original.clone());
        avatars.store_upload("bob", &mut reader).await.unwrap();

        let stored = std::fs::read(dir.path().join("profile_pictures/bob_tmp.jpg")).unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_crop_without_upload() {
        let (avatars, _dir) = service().await;
        let result = avatars.crop("carol", rect(0, 0, 10, 10)).await;
        assert!(matches!(result, Err(AvatarError::TempNotFound)));
        assert_eq!(avatars.picture_url("carol").await, "/static/img/user.png");
    }

    #[tokio::test]
    async fn test_failed_crop_keeps_temp_file() {
        let (avatars, dir) = service().await;
        let mut reader = Cursor::new(png(100, 100));
        avatars.store_upload("dave", &mut reader).await.unwrap();

        let result = avatars.crop("dave", rect(500, 500, 10, 10)).await;
        assert!(matches!(result, Err(AvatarError::InvalidCrop(_))));
        assert!(dir.path().join("profile_pictures/dave_tmp.jpg").exists());
        assert!(!dir.path().join("profile_pictures/dave.jpg").exists());
    }

    #[tokio::test]
    async fn test_garbage_upload_is_decode_error() {
        let (avatars, _dir) = service().await;
        let mut reader = Cursor::new(b"plain text, not a picture".to_vec());
        let result = avatars.store_upload("erin", &mut reader).await;
        assert!(matches!(result, Err(AvatarError::Decode(_))));
        assert_eq!(result.unwrap_err().kind(), "decode");
    }

    #[tokio::test]
    async fn test_temp_picture_url() {
        let (avatars, _dir) = service().await;
        assert_eq!(
            avatars.temp_picture_url("alice"),
            "/media/profile_pictures/alice_tmp.jpg"
        );
    }
}
