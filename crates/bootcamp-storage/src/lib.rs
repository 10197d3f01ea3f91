//! Bootcamp Storage Library
//!
//! Storage abstraction for user media and its local filesystem implementation.
//!
//! # Storage key format
//!
//! Keys are relative paths below the media root, e.g.
//! `profile_pictures/{username}.jpg`. Keys must not contain `..` or a leading `/`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
