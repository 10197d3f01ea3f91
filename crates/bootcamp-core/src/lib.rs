//! Bootcamp Core Library
//!
//! Domain models, error types, configuration and constants shared by every
//! bootcamp crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
