//! Bootcamp API Library
//!
//! HTTP handlers for the profile pages, settings forms and the profile
//! picture pipeline, plus application setup.

pub mod auth;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
