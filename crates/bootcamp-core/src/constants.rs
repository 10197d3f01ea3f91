//! Application-wide constants.

/// Number of feed entries rendered on the first page of a feed.
pub const FEEDS_NUM_PAGES: i64 = 10;

/// Directory (relative to the media root) holding profile pictures.
pub const PROFILE_PICTURES_DIR: &str = "profile_pictures";

/// Uploaded pictures wider than this are downsized before cropping.
pub const UPLOAD_MAX_WIDTH: u32 = 350;

/// Bounding box of the final avatar.
pub const AVATAR_MAX_SIZE: u32 = 200;

/// Query flag value appended to the picture page after a successful upload.
pub const UPLOADED_FLAG: &str = "uploaded";

/// Sentinel used for `from_feed` when a page holds no entries.
pub const NO_FEED: i64 = -1;

/// Storage key of a user's temporary (pre-crop) upload.
pub fn temp_picture_key(username: &str) -> String {
    format!("{}/{}_tmp.jpg", PROFILE_PICTURES_DIR, username)
}

/// Storage key of a user's final avatar.
pub fn avatar_key(username: &str) -> String {
    format!("{}/{}.jpg", PROFILE_PICTURES_DIR, username)
}
