//! v003: append-only ledgers (versions, evolution relations, validations, citations).
//! The AUTOINCREMENT id is the append order.

use rusqlite::Connection;

use capsule_core::errors::CapsuleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CapsuleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS capsule_versions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            capsule_id  TEXT NOT NULL,
            version     TEXT NOT NULL,
            changes     TEXT NOT NULL DEFAULT '',
            reason      TEXT NOT NULL DEFAULT '',
            author      TEXT NOT NULL DEFAULT '',
            datm_score  TEXT NOT NULL DEFAULT '{}',
            fingerprint TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL,
            FOREIGN KEY (capsule_id) REFERENCES provenance(capsule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_versions_capsule ON capsule_versions(capsule_id, id);

        CREATE TABLE IF NOT EXISTS evolution_relations (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            capsule_id         TEXT NOT NULL,
            related_capsule_id TEXT NOT NULL,
            relation_type      TEXT NOT NULL,
            strength           REAL NOT NULL DEFAULT 1.0,
            metadata           TEXT NOT NULL DEFAULT '{}',
            created_at         TEXT NOT NULL,
            FOREIGN KEY (capsule_id) REFERENCES provenance(capsule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_relations_source ON evolution_relations(capsule_id, id);
        CREATE INDEX IF NOT EXISTS idx_relations_target ON evolution_relations(related_capsule_id);

        CREATE TABLE IF NOT EXISTS capsule_validations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            capsule_id  TEXT NOT NULL,
            validator   TEXT NOT NULL,
            status      TEXT NOT NULL,
            evidence    TEXT NOT NULL DEFAULT '',
            comments    TEXT NOT NULL DEFAULT '',
            score       REAL,
            created_at  TEXT NOT NULL,
            FOREIGN KEY (capsule_id) REFERENCES provenance(capsule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_validations_capsule ON capsule_validations(capsule_id, id);

        CREATE TABLE IF NOT EXISTS capsule_citations (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            source_capsule_id TEXT NOT NULL,
            target_capsule_id TEXT NOT NULL,
            context           TEXT NOT NULL DEFAULT '',
            strength          REAL NOT NULL DEFAULT 1.0,
            created_at        TEXT NOT NULL,
            FOREIGN KEY (target_capsule_id) REFERENCES provenance(capsule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_citations_target ON capsule_citations(target_capsule_id, id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
