use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::NO_FEED;

/// A feed entry. Replies carry the id of the entry they answer in `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Feed {
    pub id: i64,
    pub username: String,
    pub post: String,
    pub date: DateTime<Utc>,
    pub parent: Option<i64>,
}

/// First page of a feed plus the marker used for incremental loading.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub feeds: Vec<Feed>,
    /// Id of the newest entry on the page, or -1 when the page is empty
    pub from_feed: i64,
    pub page: u32,
}

impl FeedPage {
    /// Build the first page from entries already sorted newest first.
    pub fn first(feeds: Vec<Feed>) -> Self {
        let from_feed = feeds.first().map(|f| f.id).unwrap_or(NO_FEED);
        Self {
            feeds,
            from_feed,
            page: 1,
        }
    }
}
