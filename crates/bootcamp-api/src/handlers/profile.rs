use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use bootcamp_core::constants::FEEDS_NUM_PAGES;
use bootcamp_core::models::{FeedPage, PublicUser};
use bootcamp_core::AppError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    #[serde(flatten)]
    pub feed: FeedPage,
}

/// Public profile of `username` with the first page of their feed.
#[tracing::instrument(skip(state), fields(operation = "profile"))]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, HttpAppError> {
    let user = state
        .users
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

    let feeds = state
        .feeds
        .latest_by_user(&user.username, FEEDS_NUM_PAGES)
        .await?;
    let picture_url = state.avatars.picture_url(&user.username).await;

    Ok(Json(ProfileResponse {
        user: PublicUser::new(&user, picture_url),
        feed: FeedPage::first(feeds),
    }))
}
