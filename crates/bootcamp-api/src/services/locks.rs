use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

// Idle entries are dropped once the map grows past this many users.
const PRUNE_THRESHOLD: usize = 1024;

/// One async lock per username.
///
/// Upload and crop for the same user run one at a time; different users never
/// contend.
#[derive(Clone, Default)]
pub struct UserLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and hold the lock of `username` until the guard is dropped.
    pub async fn lock(&self, username: &str) -> OwnedMutexGuard<()> {
        let user_lock = {
            let mut guard = self.inner.lock().await;
            if guard.len() >= PRUNE_THRESHOLD {
                guard.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            guard
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        user_lock.lock_owned().await
    }
}
