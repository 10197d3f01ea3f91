//! Shared application state.

use crate::auth::TokenKeys;
use crate::services::avatar::AvatarService;
use bootcamp_core::Config;
use bootcamp_db::{FeedStore, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub feeds: Arc<dyn FeedStore>,
    pub avatars: AvatarService,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        feeds: Arc<dyn FeedStore>,
        avatars: AvatarService,
    ) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_expiry_hours);
        Self {
            config,
            users,
            feeds,
            avatars,
            tokens,
        }
    }
}
