//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::AvatarService;
use crate::state::AppState;
use anyhow::{Context, Result};
use bootcamp_core::Config;
use std::sync::Arc;

/// Validate configuration, connect stores and storage, and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let (users, feeds) = database::setup_stores(&config).await?;
    database::seed_account(&config, users.as_ref()).await?;

    let storage = storage::setup_storage(&config).await?;
    let avatars = AvatarService::new(storage, &config);

    let state = Arc::new(AppState::new(config.clone(), users, feeds, avatars));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
