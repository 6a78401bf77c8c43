//! `DatabaseManager` — owns the SQLite connection and applies pragmas and
//! migrations on open.
//!
//! The store is the single owner of the connection; everything else goes
//! through `with_conn`. Concurrent period writers serialize here: writes
//! are last-writer-wins upserts, so one mutex-guarded connection is all
//! the locking this layer needs.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use lanewatch_core::{StorageError, StorageResult};

use crate::migrations;

pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database, applying pragmas and migrations.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        migrations::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        apply_pragmas(&conn)?;
        migrations::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (`None` for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure against the connection.
    pub fn with_conn<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::Sqlite {
            message: "connection mutex poisoned".to_string(),
        })?;
        f(&conn)
    }
}

fn apply_pragmas(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )?;
    Ok(())
}
