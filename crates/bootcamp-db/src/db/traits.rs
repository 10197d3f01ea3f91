use async_trait::async_trait;
use bootcamp_core::models::{Feed, NewUser, ProfileFields, User};
use bootcamp_core::AppError;

/// Persistent storage of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Active users ordered by username.
    async fn list_active(&self) -> Result<Vec<User>, AppError>;

    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Replace the editable profile fields. `NotFound` when the user is gone.
    async fn update_profile(&self, username: &str, fields: &ProfileFields)
        -> Result<User, AppError>;

    async fn set_password_hash(&self, username: &str, password_hash: &str)
        -> Result<(), AppError>;
}

/// Read side of the feed subsystem.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Newest top-level entries across all users.
    async fn latest(&self, limit: i64) -> Result<Vec<Feed>, AppError>;

    /// Newest top-level entries written by `username`.
    async fn latest_by_user(&self, username: &str, limit: i64) -> Result<Vec<Feed>, AppError>;
}
