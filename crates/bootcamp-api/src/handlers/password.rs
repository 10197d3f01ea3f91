use crate::auth::password::{hash_password, verify_password};
use crate::auth::CurrentUser;
use crate::error::{HttpAppError, ValidatedForm};
use crate::forms::{ChangePasswordForm, FormResponse};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bootcamp_core::error::FieldErrors;
use bootcamp_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub const PASSWORD_CHANGED: &str = "Your password were successfully changed.";

/// Password fields are never echoed back, so the form is always blank.
#[derive(Debug, Default, Serialize)]
pub struct BlankPasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub async fn get_password(_user: CurrentUser) -> Json<FormResponse<BlankPasswordForm>> {
    Json(FormResponse::new(BlankPasswordForm::default()))
}

#[tracing::instrument(skip(state, form), fields(operation = "change_password", username = %user.username))]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedForm(form): ValidatedForm<ChangePasswordForm>,
) -> Result<Response, HttpAppError> {
    let record = state
        .users
        .get_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user.username)))?;

    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => AppError::from(e).field_errors().cloned().unwrap_or_default(),
    };

    if !form.old_password.is_empty() && !verify_password(&form.old_password, &record.password_hash)?
    {
        errors
            .entry("old_password".to_string())
            .or_default()
            .push("Your old password was entered incorrectly.".to_string());
    }

    if !errors.is_empty() {
        tracing::debug!(username = %user.username, "Password form rejected");
        let body = FormResponse::new(BlankPasswordForm::default()).with_errors(errors);
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let hash = hash_password(&form.new_password)?;
    state.users.set_password_hash(&user.username, &hash).await?;
    tracing::info!(username = %user.username, "Password changed");

    let body = FormResponse::new(BlankPasswordForm::default()).with_message(PASSWORD_CHANGED);
    Ok(Json(body).into_response())
}
