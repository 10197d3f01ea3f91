//! Store setup: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise

use crate::auth::password::hash_password;
use anyhow::{Context, Result};
use bootcamp_core::models::{NewUser, ProfileFields};
use bootcamp_core::Config;
use bootcamp_db::{
    FeedRepository, FeedStore, InMemoryFeedStore, InMemoryUserStore, UserRepository, UserStore,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub async fn setup_stores(config: &Config) -> Result<(Arc<dyn UserStore>, Arc<dyn FeedStore>)> {
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = setup_database(config, url).await?;
            Ok((
                Arc::new(UserRepository::new(pool.clone())),
                Arc::new(FeedRepository::new(pool)),
            ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores; data is lost on restart");
            Ok((
                Arc::new(InMemoryUserStore::new()),
                Arc::new(InMemoryFeedStore::new()),
            ))
        }
    }
}

/// Connect the pool and run pending migrations.
async fn setup_database(config: &Config, url: &str) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    // workspace migrations/ relative to this crate
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Create the configured seed account unless it already exists.
pub async fn seed_account(config: &Config, users: &dyn UserStore) -> Result<()> {
    let Some((username, password)) = &config.seed_account else {
        return Ok(());
    };

    if users.get_by_username(username).await?.is_some() {
        tracing::debug!(username = %username, "Seed account already exists");
        return Ok(());
    }

    users
        .create(NewUser {
            username: username.clone(),
            password_hash: hash_password(password)?,
            profile: ProfileFields::default(),
        })
        .await?;
    tracing::info!(username = %username, "Seed account created");

    Ok(())
}
