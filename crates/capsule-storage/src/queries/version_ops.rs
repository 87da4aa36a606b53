//! Version ledger appends and reads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{CapsuleVersion, NewVersion};

use super::provenance_ops::{require_registered, touch};
use super::{format_ts, parse_json, parse_ts};
use crate::to_storage_err;

/// Append a version, bump `version_count`, and move `current_version`.
pub fn append_version(conn: &Connection, input: &NewVersion) -> CapsuleResult<CapsuleVersion> {
    require_registered(conn, &input.capsule_id)?;
    append_version_at(conn, input, Utc::now())
}

/// Append with an explicit timestamp. The provenance row must already exist.
pub(crate) fn append_version_at(
    conn: &Connection,
    input: &NewVersion,
    at: DateTime<Utc>,
) -> CapsuleResult<CapsuleVersion> {
    let datm_json = serde_json::to_string(&input.datm_score)?;
    conn.execute(
        "INSERT INTO capsule_versions
             (capsule_id, version, changes, reason, author, datm_score, fingerprint, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            input.capsule_id,
            input.version,
            input.changes,
            input.reason,
            input.author,
            datm_json,
            input.fingerprint,
            format_ts(&at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    touch(
        conn,
        &input.capsule_id,
        Some("version_count"),
        Some(&input.version),
        &at,
    )?;

    Ok(CapsuleVersion {
        version: input.version.clone(),
        timestamp: at,
        changes: input.changes.clone(),
        reason: input.reason.clone(),
        author: input.author.clone(),
        datm_score: input.datm_score.clone(),
        fingerprint: input.fingerprint.clone(),
    })
}

/// All versions of a capsule in append order.
pub fn load_versions(conn: &Connection, capsule_id: &str) -> CapsuleResult<Vec<CapsuleVersion>> {
    let mut stmt = conn
        .prepare(
            "SELECT version, changes, reason, author, datm_score, fingerprint, created_at
             FROM capsule_versions WHERE capsule_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![capsule_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut versions = Vec::new();
    for row in rows {
        let (version, changes, reason, author, datm, fingerprint, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let datm_score: BTreeMap<String, f64> = parse_json("capsule_versions.datm_score", &datm)?;
        versions.push(CapsuleVersion {
            version,
            timestamp: parse_ts(&created_at)?,
            changes,
            reason,
            author,
            datm_score,
            fingerprint,
        });
    }
    Ok(versions)
}

pub fn count_versions(conn: &Connection, capsule_id: &str) -> CapsuleResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM capsule_versions WHERE capsule_id = ?1",
            params![capsule_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(super::to_count(count))
}

/// Label of the most recently appended version, if any.
pub fn last_version_label(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<String>> {
    use rusqlite::OptionalExtension;
    conn.query_row(
        "SELECT version FROM capsule_versions WHERE capsule_id = ?1 ORDER BY id DESC LIMIT 1",
        params![capsule_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}
