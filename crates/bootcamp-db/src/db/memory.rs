//! In-memory stores
//!
//! Used when `DATABASE_URL` is not set and by the HTTP test suite. Data lives
//! only as long as the process.

use crate::db::traits::{FeedStore, UserStore};
use async_trait::async_trait;
use bootcamp_core::models::{Feed, NewUser, ProfileFields, User};
use bootcamp_core::AppError;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct UserTable {
    next_id: i64,
    // keyed by username, so iteration is already in username order
    rows: BTreeMap<String, User>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<RwLock<UserTable>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the active flag, e.g. to hide a user from the network listing.
    pub async fn set_active(&self, username: &str, active: bool) -> Result<(), AppError> {
        let mut table = self.inner.write().await;
        let user = table
            .rows
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        user.is_active = active;
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.rows.get(username).cloned())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let table = self.inner.read().await;
        Ok(table.rows.values().filter(|u| u.is_active).cloned().collect())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut table = self.inner.write().await;
        if table.rows.contains_key(&user.username) {
            return Err(AppError::InvalidInput(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        table.next_id += 1;
        let profile = user.profile;
        let created = User {
            id: table.next_id,
            username: user.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            job_title: profile.job_title,
            url: profile.url,
            location: profile.location,
            password_hash: user.password_hash,
            is_active: true,
            date_joined: Utc::now(),
        };
        table.rows.insert(created.username.clone(), created.clone());
        tracing::debug!(username = %created.username, id = created.id, "User created");

        Ok(created)
    }

    async fn update_profile(
        &self,
        username: &str,
        fields: &ProfileFields,
    ) -> Result<User, AppError> {
        let mut table = self.inner.write().await;
        let user = table
            .rows
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        user.apply_profile(fields.clone());
        Ok(user.clone())
    }

    async fn set_password_hash(&self, username: &str, password_hash: &str) -> Result<(), AppError> {
        let mut table = self.inner.write().await;
        let user = table
            .rows
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryFeedStore {
    entries: Arc<RwLock<Vec<Feed>>>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry with the next id.
    pub async fn insert(&self, username: &str, post: &str, parent: Option<i64>) -> Feed {
        let mut entries = self.entries.write().await;
        let id = entries.last().map(|f| f.id + 1).unwrap_or(1);
        let feed = Feed {
            id,
            username: username.to_string(),
            post: post.to_string(),
            date: Utc::now(),
            parent,
        };
        entries.push(feed.clone());
        feed
    }

    async fn newest_top_level(&self, limit: i64, author: Option<&str>) -> Vec<Feed> {
        let limit = usize::try_from(limit).unwrap_or(0);
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .filter(|f| f.parent.is_none())
            .filter(|f| author.map_or(true, |a| f.username == a))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn latest(&self, limit: i64) -> Result<Vec<Feed>, AppError> {
        Ok(self.newest_top_level(limit, None).await)
    }

    async fn latest_by_user(&self, username: &str, limit: i64) -> Result<Vec<Feed>, AppError> {
        Ok(self.newest_top_level(limit, Some(username)).await)
    }
}
