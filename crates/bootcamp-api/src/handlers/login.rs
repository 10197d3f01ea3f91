use crate::auth::password::verify_password;
use crate::error::{HttpAppError, ValidatedJson};
use crate::forms::LoginRequest;
use crate::state::AppState;
use axum::{extract::State, Json};
use bootcamp_core::AppError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Exchange username and password for a bearer token.
#[tracing::instrument(skip_all, fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, HttpAppError> {
    let invalid =
        || HttpAppError(AppError::Unauthorized("Invalid username or password".to_string()));

    let user = match state.users.get_by_username(request.username.trim()).await? {
        Some(user) if user.is_active => user,
        _ => return Err(invalid()),
    };

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::debug!(username = %user.username, "Wrong password");
        return Err(invalid());
    }

    let token = state.tokens.issue(&user.username)?;
    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in: state.tokens.expires_in(),
    }))
}
