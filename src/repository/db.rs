//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::engine::StoreEngine;
use crate::config::StoreConfig;
use crate::error::{DomainError, DomainResult};

/// Database state wrapper
///
/// Clones share the same connection slot.
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: Arc<Mutex<Option<Connection>>>,
    engine: StoreEngine,
}

impl DbState {
    /// Empty state; every store call fails with `NotInitialized` until filled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> StoreEngine {
        self.engine
    }

    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

/// Open the configured database and run migrations.
pub async fn init_db(config: &StoreConfig) -> DomainResult<DbState> {
    let conn = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        Connection::open(&config.database_path)?
    };
    conn.busy_timeout(config.busy_timeout())?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    run_migrations(&conn)?;
    // A rusqlite connection is always SQLite.
    let engine = StoreEngine::Sqlite;

    tracing::debug!(
        path = %config.database_path.display(),
        %engine,
        sqlite_version = rusqlite::version(),
        "tag store initialized"
    );

    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
        engine,
    })
}

/// Lock the shared slot and run `f` against the live connection.
///
/// The lock is released when `f` returns, so callers never hold it across
/// more than one round-trip.
pub(crate) async fn with_connection<R>(
    conn: &Mutex<Option<Connection>>,
    f: impl FnOnce(&Connection) -> DomainResult<R> + Send,
) -> DomainResult<R> {
    let guard = conn.lock().await;
    let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;
    f(conn)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE CHECK (trim(name) <> '')
        );

        CREATE TABLE IF NOT EXISTS taggings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            taggable_type TEXT NOT NULL,
            taggable_id INTEGER NOT NULL,
            context TEXT NOT NULL DEFAULT 'tags',
            created_at INTEGER NOT NULL,
            UNIQUE (tag_id, taggable_type, taggable_id, context)
        );

        CREATE INDEX IF NOT EXISTS idx_taggings_tag ON taggings(tag_id);
        CREATE INDEX IF NOT EXISTS idx_taggings_taggable
            ON taggings(taggable_type, taggable_id, context);",
    )?;

    Ok(())
}
