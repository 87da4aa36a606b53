//! v002: provenance (one row per registered capsule, with derived counters).

use rusqlite::Connection;

use capsule_core::errors::CapsuleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CapsuleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS provenance (
            id              TEXT PRIMARY KEY,
            capsule_id      TEXT NOT NULL UNIQUE,
            source_type     TEXT NOT NULL,
            source_id       TEXT,
            source_data     TEXT NOT NULL DEFAULT '{}',
            current_version TEXT NOT NULL,
            version_count   INTEGER NOT NULL DEFAULT 0,
            citation_count  INTEGER NOT NULL DEFAULT 0,
            verified_count  INTEGER NOT NULL DEFAULT 0,
            disputed_count  INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_provenance_created ON provenance(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
