//! Request forms and their validation rules.

use bootcamp_core::error::FieldErrors;
use bootcamp_core::models::ProfileFields;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

/// Profile settings form. Every field is optional; blank clears the value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub first_name: String,

    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub last_name: String,

    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub job_title: String,

    #[validate(
        length(max = 75, message = "Ensure this value has at most 75 characters."),
        custom(function = "optional_email")
    )]
    pub email: String,

    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub url: String,

    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub location: String,
}

impl From<ProfileFields> for ProfileForm {
    fn from(fields: ProfileFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            job_title: fields.job_title,
            email: fields.email,
            url: fields.url,
            location: fields.location,
        }
    }
}

impl From<ProfileForm> for ProfileFields {
    fn from(form: ProfileForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            job_title: form.job_title,
            url: form.url,
            location: form.location,
        }
    }
}

impl ProfileForm {
    /// Strip surrounding whitespace; length limits apply to what gets stored.
    pub fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            email: self.email.trim().to_string(),
            url: self.url.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}

fn optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Enter a valid email address.".into()))
    }
}

/// Password change form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ChangePasswordForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub old_password: String,

    #[validate(length(
        min = 1,
        max = 30,
        message = "Ensure this value has between 1 and 30 characters."
    ))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords don't match."))]
    pub confirm_password: String,
}

/// Crop coordinates, kept as raw strings so malformed values reach the
/// handler instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CropForm {
    pub x: Option<String>,
    pub y: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Form echoed back to the client with an optional message and field errors.
#[derive(Debug, Serialize)]
pub struct FormResponse<T: Serialize> {
    pub form: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl<T: Serialize> FormResponse<T> {
    pub fn new(form: T) -> Self {
        Self {
            form,
            message: None,
            errors: FieldErrors::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}
