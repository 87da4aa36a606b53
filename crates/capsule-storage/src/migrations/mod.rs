//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_capsules;
pub mod v002_provenance;
pub mod v003_ledgers;

use rusqlite::Connection;

use capsule_core::errors::{CapsuleError, CapsuleResult, StorageError};

type MigrationFn = fn(&Connection) -> CapsuleResult<()>;

/// Ordered list of (version, migration).
const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_capsules::migrate),
    (2, v002_provenance::migrate),
    (3, v003_ledgers::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// Run all pending migrations. Each migration and its version bump commit together.
pub fn run_migrations(conn: &Connection) -> CapsuleResult<u32> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, migrate) in MIGRATIONS {
        if current >= *version {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| migration_err(*version, e.to_string()))?;
        migrate(&tx).map_err(|e| migration_err(*version, e.to_string()))?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| migration_err(*version, e.to_string()))?;
        tx.commit()
            .map_err(|e| migration_err(*version, e.to_string()))?;
        tracing::info!(version = version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> CapsuleResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| migration_err(0, e.to_string()))
}

fn migration_err(version: u32, reason: String) -> CapsuleError {
    CapsuleError::StorageError(StorageError::MigrationFailed { version, reason })
}
