//! Authentication: password hashing, bearer tokens and the route guard.

pub mod middleware;
pub mod models;
pub mod password;
pub mod token;

pub use models::{Claims, CurrentUser};
pub use token::TokenKeys;
