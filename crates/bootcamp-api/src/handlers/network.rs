use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use bootcamp_core::models::PublicUser;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub users: Vec<PublicUser>,
}

/// Every active user, ordered by username.
#[tracing::instrument(skip(state), fields(operation = "network"))]
pub async fn network(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NetworkResponse>, HttpAppError> {
    let users = state.users.list_active().await?;

    let mut public = Vec::with_capacity(users.len());
    for user in &users {
        let picture_url = state.avatars.picture_url(&user.username).await;
        public.push(PublicUser::new(user, picture_url));
    }

    Ok(Json(NetworkResponse { users: public }))
}
