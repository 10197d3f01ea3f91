pub mod avatar;
pub mod locks;

pub use avatar::{AvatarError, AvatarService};
pub use locks::UserLocks;
