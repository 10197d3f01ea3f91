use crate::db::traits::FeedStore;
use async_trait::async_trait;
use bootcamp_core::models::Feed;
use bootcamp_core::AppError;
use sqlx::{PgPool, Postgres};

/// PostgreSQL-backed feed reader
#[derive(Clone)]
pub struct FeedRepository {
    pool: PgPool,
}

impl FeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedStore for FeedRepository {
    #[tracing::instrument(skip(self), fields(db.table = "feeds", db.operation = "select"))]
    async fn latest(&self, limit: i64) -> Result<Vec<Feed>, AppError> {
        let feeds = sqlx::query_as::<Postgres, Feed>(
            r#"
            SELECT id, username, post, date, parent
            FROM feeds
            WHERE parent IS NULL
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(feeds)
    }

    #[tracing::instrument(skip(self), fields(db.table = "feeds", db.operation = "select"))]
    async fn latest_by_user(&self, username: &str, limit: i64) -> Result<Vec<Feed>, AppError> {
        let feeds = sqlx::query_as::<Postgres, Feed>(
            r#"
            SELECT id, username, post, date, parent
            FROM feeds
            WHERE parent IS NULL AND username = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(username)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, username = %username, "Failed to load user feed");
            AppError::Database(e)
        })?;

        Ok(feeds)
    }
}
