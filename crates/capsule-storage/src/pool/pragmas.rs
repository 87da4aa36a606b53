//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, foreign_keys ON, configurable busy_timeout.

use rusqlite::Connection;

use capsule_core::config::StorageConfig;
use capsule_core::errors::CapsuleResult;

use crate::to_storage_err;

/// Apply write-side pragmas.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> CapsuleResult<()> {
    let journal = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal};
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply read-side pragmas. Readers never write.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> CapsuleResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA query_only = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> CapsuleResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
