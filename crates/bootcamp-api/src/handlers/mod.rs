pub mod feed;
pub mod health;
pub mod login;
pub mod network;
pub mod password;
pub mod picture;
pub mod profile;
pub mod settings;
