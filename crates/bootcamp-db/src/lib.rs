//! Bootcamp persistence layer
//!
//! Repositories for user profiles and feed entries. Each store is a trait with
//! a PostgreSQL implementation and an in-memory one used when no database is
//! configured (and by the test suites).

pub mod db;

pub use db::{
    FeedRepository, FeedStore, InMemoryFeedStore, InMemoryUserStore, UserRepository, UserStore,
};
