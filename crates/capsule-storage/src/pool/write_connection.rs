//! Single write connection behind `tokio::sync::Mutex`.
//! Serialized writes, no contention between appends.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use capsule_core::config::StorageConfig;
use capsule_core::errors::CapsuleResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, config: &StorageConfig) -> CapsuleResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> CapsuleResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Synchronous access for non-async callers. Must not be called from
    /// inside a tokio runtime worker.
    pub fn with_conn_sync<F, T>(&self, f: F) -> CapsuleResult<T>
    where
        F: FnOnce(&Connection) -> CapsuleResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
