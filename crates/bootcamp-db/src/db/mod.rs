//! Database repositories for data access layer
//
// Store traits shared by every backend
pub mod traits;
//
// PostgreSQL repositories
pub mod feed;
pub mod user;
//
// In-memory backends
pub mod memory;

pub use feed::FeedRepository;
pub use memory::{InMemoryFeedStore, InMemoryUserStore};
pub use traits::{FeedStore, UserStore};
pub use user::UserRepository;
