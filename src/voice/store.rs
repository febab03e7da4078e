//! Persistent tier contract

use super::CacheKey;

/// Durable key → raw audio bytes store
///
/// Implementations never fail towards the caller: read errors come back as
/// `None`, write errors are logged and dropped. A failed write leaves the key
/// absent or stale until the next preload rewrites it.
pub trait AudioStore: Send + Sync {
    /// Stored bytes for `key`, or `None` when absent or unreadable
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>>;

    /// Store `bytes` under `key`, replacing any previous value
    fn put(&self, key: &CacheKey, bytes: &[u8]);
}
