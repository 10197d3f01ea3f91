use crate::db::traits::UserStore;
use async_trait::async_trait;
use bootcamp_core::models::{NewUser, ProfileFields, User};
use bootcamp_core::AppError;
use sqlx::{PgPool, Postgres};

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, job_title, url, location, \
     password_hash, is_active, date_joined";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE is_active ORDER BY username ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self, user), fields(db.table = "users", db.operation = "insert", username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<Postgres, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, email, job_title, url, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.email)
        .bind(&user.profile.job_title)
        .bind(&user.profile.url)
        .bind(&user.profile.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, username = %user.username, "Failed to insert user");
            AppError::Database(e)
        })?;

        Ok(created)
    }

    #[tracing::instrument(skip(self, fields), fields(db.table = "users", db.operation = "update"))]
    async fn update_profile(
        &self,
        username: &str,
        fields: &ProfileFields,
    ) -> Result<User, AppError> {
        let updated = sqlx::query_as::<Postgres, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, job_title = $5, url = $6, location = $7
            WHERE username = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.job_title)
        .bind(&fields.url)
        .bind(&fields.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, username = %username, "Failed to update profile");
            AppError::Database(e)
        })?;

        updated.ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users", db.operation = "update"))]
    async fn set_password_hash(&self, username: &str, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE username = $1")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User '{}' not found", username)));
        }

        Ok(())
    }
}
