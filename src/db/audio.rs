//! Raw audio repository backing the persistent cache tier

use rusqlite::OptionalExtension;

use super::DbPool;
use crate::voice::{AudioStore, CacheKey};
use crate::{Error, Result};

/// Repository for raw PCM keyed by cache key
#[derive(Debug, Clone)]
pub struct AudioRepo {
    pool: DbPool,
}

impl AudioRepo {
    /// Create a new repository
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load the bytes stored under `key`
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let data = conn
            .query_row(
                "SELECT data FROM static_audio WHERE key = ?1",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(data)
    }

    /// Insert or replace the bytes stored under `key`
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        conn.execute(
            r"INSERT INTO static_audio (key, data) VALUES (?1, ?2)
              ON CONFLICT(key) DO UPDATE SET data = excluded.data",
            rusqlite::params![key, data],
        )?;

        Ok(())
    }

    /// Number of stored phrases
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn count(&self) -> Result<usize> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM static_audio", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl AudioStore for AudioRepo {
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        match self.load(key.as_str()) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "audio store read failed");
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, bytes: &[u8]) {
        if let Err(e) = self.save(key.as_str(), bytes) {
            tracing::warn!(key = %key, error = %e, "audio store write failed");
        }
    }
}
