use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use bootcamp_core::constants::FEEDS_NUM_PAGES;
use bootcamp_core::models::FeedPage;
use std::sync::Arc;

/// Home page: first page of the global feed.
#[tracing::instrument(skip(state), fields(operation = "home"))]
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Json<FeedPage>, HttpAppError> {
    let feeds = state.feeds.latest(FEEDS_NUM_PAGES).await?;
    Ok(Json(FeedPage::first(feeds)))
}
