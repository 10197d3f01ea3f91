use crate::auth::CurrentUser;
use crate::error::{HttpAppError, ValidatedForm};
use crate::forms::{FormResponse, ProfileForm};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bootcamp_core::models::ProfileFields;
use bootcamp_core::AppError;
use std::sync::Arc;
use validator::Validate;

pub const PROFILE_SAVED: &str = "Your profile were successfully edited.";

/// Settings form pre-filled from the current profile.
#[tracing::instrument(skip(state), fields(operation = "settings", username = %user.username))]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<FormResponse<ProfileForm>>, HttpAppError> {
    let record = state
        .users
        .get_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user.username)))?;

    Ok(Json(FormResponse::new(ProfileForm::from(
        record.profile_fields(),
    ))))
}

/// Validate the submitted form and copy the editable fields onto the profile.
#[tracing::instrument(skip(state, form), fields(operation = "update_settings", username = %user.username))]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedForm(form): ValidatedForm<ProfileForm>,
) -> Result<Response, HttpAppError> {
    let form = form.trimmed();
    if let Err(errors) = form.validate() {
        let errors = AppError::from(errors);
        tracing::debug!(username = %user.username, "Settings form rejected");
        let fields = errors.field_errors().cloned().unwrap_or_default();
        let body = FormResponse::new(form).with_errors(fields);
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let fields = ProfileFields::from(form);
    let updated = state.users.update_profile(&user.username, &fields).await?;
    tracing::info!(username = %updated.username, "Profile updated");

    let body = FormResponse::new(ProfileForm::from(updated.profile_fields()))
        .with_message(PROFILE_SAVED);
    Ok(Json(body).into_response())
}
