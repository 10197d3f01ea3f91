use crate::auth::models::CurrentUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bootcamp_core::AppError;
use std::sync::Arc;

/// Reject requests without a valid bearer token for an active user.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    let claims = match state.tokens.verify(token.trim()) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    // Tokens outlive deactivation, so the account is checked on every request.
    match state.users.get_by_username(&claims.sub).await {
        Ok(Some(user)) if user.is_active => {}
        Ok(_) => {
            tracing::debug!(username = %claims.sub, "Token for unknown or inactive user");
            return HttpAppError(AppError::Unauthorized("Account is not active".to_string()))
                .into_response();
        }
        Err(e) => return HttpAppError(e).into_response(),
    }

    request.extensions_mut().insert(CurrentUser {
        username: claims.sub,
    });
    next.run(request).await
}
