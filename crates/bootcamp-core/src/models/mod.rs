pub mod feed;
pub mod user;

pub use feed::{Feed, FeedPage};
pub use user::{NewUser, ProfileFields, PublicUser, User};
