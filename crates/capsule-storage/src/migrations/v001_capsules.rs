//! v001: capsules (the content collaborator table).

use rusqlite::Connection;

use capsule_core::errors::CapsuleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CapsuleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS capsules (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            domain      TEXT NOT NULL,
            data        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_capsules_created ON capsules(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
