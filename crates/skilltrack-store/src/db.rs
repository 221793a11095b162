//! SQLite database setup with WAL mode and a small set of pragmas.
//!
//! The [`Database`] struct wraps a `rusqlite::Connection` behind an
//! `Arc<Mutex<>>`. All access goes through [`Database::execute`], which
//! runs a closure against the locked connection on the caller's thread.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migration;

/// Cloneable handle to a SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database at `path` and apply pragmas.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database, mainly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        debug!("opening in-memory database");

        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database and run all pending migrations.
    pub fn open_and_migrate(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Self::open(path)?;
        db.run_migrations()?;
        Ok(db)
    }

    /// Run all pending schema migrations.
    pub fn run_migrations(&self) -> StoreResult<()> {
        self.execute(migration::run_all)
    }

    /// Run a closure against the connection.
    ///
    /// ```ignore
    /// let count: i64 = db.execute(|conn| {
    ///     Ok(conn.query_row("SELECT count(*) FROM kv_store", [], |row| row.get(0))?)
    /// })?;
    /// ```
    pub fn execute<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        f(&conn)
    }

    // ── pragmas ──────────────────────────────────────────────────────

    fn apply_pragmas(conn: &Connection) -> StoreResult<()> {
        debug!("applying SQLite pragmas");

        // WAL mode.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // With WAL, NORMAL only risks the last transaction on power loss.
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        conn.pragma_update(None, "temp_store", "MEMORY")?;

        // Another process holding the file waits instead of failing.
        conn.pragma_update(None, "busy_timeout", 5_000_i32)?;

        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

// ── tests ────────────────────────────────────────────────────────────
