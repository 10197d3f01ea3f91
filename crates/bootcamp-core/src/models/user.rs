use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account together with its profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub url: String,
    pub location: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// The editable profile fields, as submitted by the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub url: String,
    pub location: String,
}

/// Data needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub profile: ProfileFields,
}

impl User {
    pub fn profile_fields(&self) -> ProfileFields {
        ProfileFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            job_title: self.job_title.clone(),
            url: self.url.clone(),
            location: self.location.clone(),
        }
    }

    /// Overwrite the editable profile fields, leaving identity and credentials untouched.
    pub fn apply_profile(&mut self, fields: ProfileFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
        self.job_title = fields.job_title;
        self.url = fields.url;
        self.location = fields.location;
    }

    /// "First Last", or the username when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// User as shown on public pages (never carries the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub url: String,
    pub location: String,
    pub picture_url: String,
    pub date_joined: DateTime<Utc>,
}

impl PublicUser {
    pub fn new(user: &User, picture_url: String) -> Self {
        Self {
            username: user.username.clone(),
            display_name: user.display_name(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            job_title: user.job_title.clone(),
            url: user.url.clone(),
            location: user.location.clone(),
            picture_url,
            date_joined: user.date_joined,
        }
    }
}
