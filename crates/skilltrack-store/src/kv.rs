//! Key-value slots in SQLite.
//!
//! Each key holds one UTF-8 text value plus the time it was last written.
//! The skill list lives under a single key; other keys are free for shells
//! that want to keep their own small state next to it.

use tracing::{debug, instrument};

use crate::db::Database;
use crate::error::StoreResult;

/// Persistent key-value store.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    db: Database,
}

impl KeyValueStore {
    /// Create a key-value store backed by `db`. Migrations must have run.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a value by key, returning `None` if not found.
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.db.execute(|conn| {
            let result = conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            );
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Set a value for a key (insert or update).
    #[instrument(skip(self, value), fields(len = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.db.execute(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                 updated_at = excluded.updated_at",
                rusqlite::params![key, value, now],
            )?;
            debug!(key, "kv slot updated");
            Ok(())
        })
    }

    /// Delete a key, returning `true` if it existed.
    #[instrument(skip(self))]
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        self.db.execute(|conn| {
            let deleted = conn.execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])?;
            Ok(deleted > 0)
        })
    }

    /// When a key was last written, as epoch milliseconds.
    pub fn updated_at(&self, key: &str) -> StoreResult<Option<i64>> {
        self.db.execute(|conn| {
            let result = conn.query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            );
            match result {
                Ok(ts) => Ok(Some(ts)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> KeyValueStore {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().unwrap();
        KeyValueStore::new(db)
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let kv = setup();
        assert!(kv.get("missing").unwrap().is_none());
        assert!(kv.updated_at("missing").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let kv = setup();
        kv.set("key1", "value1").unwrap();
        assert_eq!(kv.get("key1").unwrap(), Some("value1".to_string()));
        assert!(kv.updated_at("key1").unwrap().is_some());
    }

    #[test]
    fn set_overwrites() {
        let kv = setup();
        kv.set("key1", "old").unwrap();
        kv.set("key1", "new").unwrap();
        assert_eq!(kv.get("key1").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn delete_existing_and_missing() {
        let kv = setup();
        kv.set("key1", "val").unwrap();
        assert!(kv.delete("key1").unwrap());
        assert!(kv.get("key1").unwrap().is_none());
        assert!(!kv.delete("key1").unwrap());
    }

    #[test]
    fn values_keep_unicode() {
        let kv = setup();
        kv.set("notes", "délai, 締め切り").unwrap();
        assert_eq!(kv.get("notes").unwrap().as_deref(), Some("délai, 締め切り"));
    }
}
