//! Storage setup and initialization

use anyhow::{Context, Result};
use bootcamp_core::constants::PROFILE_PICTURES_DIR;
use bootcamp_core::Config;
use bootcamp_storage::{LocalStorage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.media_root)
        .await
        .context("Failed to initialize media storage")?;
    storage
        .ensure_dir(PROFILE_PICTURES_DIR)
        .await
        .context("Failed to create profile picture directory")?;

    tracing::info!(
        media_root = %config.media_root.display(),
        media_url = %config.media_url,
        "Media storage initialized"
    );

    Ok(Arc::new(storage))
}
