//! Capsule collaborator CRUD. The full snapshot lives in `data` as JSON;
//! title and domain are duplicated for inspection.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use capsule_core::errors::{CapsuleError, CapsuleResult};
use capsule_core::models::{CapsuleSnapshot, CapsuleUpdate};

use super::{format_ts, is_unique_violation, parse_json, provenance_ops};
use crate::to_storage_err;

/// Insert a new capsule. Fails with `CapsuleExists` on a duplicate id.
pub fn insert_capsule(conn: &Connection, capsule: &CapsuleSnapshot) -> CapsuleResult<()> {
    let data = serde_json::to_string(capsule)?;
    conn.execute(
        "INSERT INTO capsules (id, title, domain, data, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            capsule.id,
            capsule.title,
            capsule.domain,
            data,
            format_ts(&capsule.created_at),
            format_ts(&capsule.updated_at),
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            CapsuleError::CapsuleExists {
                id: capsule.id.clone(),
            }
        } else {
            to_storage_err(e.to_string())
        }
    })?;
    Ok(())
}

pub fn get_capsule(conn: &Connection, id: &str) -> CapsuleResult<Option<CapsuleSnapshot>> {
    let data: Option<String> = conn
        .query_row("SELECT data FROM capsules WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    data.map(|raw| parse_json("capsules.data", &raw)).transpose()
}

/// Read-modify-write of the mutable fields. Callers wrap this in an
/// immediate transaction.
///
/// With `from_ledger` set, mirrored counters are taken from the provenance
/// row inside the same transaction, so a late writer carrying an older
/// count cannot move the capsule behind the ledger.
pub fn update_capsule(conn: &Connection, id: &str, update: &CapsuleUpdate) -> CapsuleResult<()> {
    let mut capsule =
        get_capsule(conn, id)?.ok_or_else(|| CapsuleError::CapsuleNotFound { id: id.to_string() })?;
    if update.is_empty() {
        return Ok(());
    }
    let resolved;
    let update = if update.from_ledger {
        resolved = resolve_ledger_counts(conn, id, update)?;
        &resolved
    } else {
        update
    };
    update.apply_to(&mut capsule);
    capsule.updated_at = Utc::now();

    let data = serde_json::to_string(&capsule)?;
    conn.execute(
        "UPDATE capsules SET data = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, data, format_ts(&capsule.updated_at)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn resolve_ledger_counts(
    conn: &Connection,
    id: &str,
    update: &CapsuleUpdate,
) -> CapsuleResult<CapsuleUpdate> {
    let mut resolved = update.clone();
    if let Some(header) = provenance_ops::get_header(conn, id)? {
        if resolved.citations.is_some() {
            resolved.citations = Some(header.citation_count);
        }
        if resolved.validations.is_some() {
            resolved.validations = Some(header.verified_count);
        }
    }
    Ok(resolved)
}

/// Capsules newest first.
pub fn list_capsules(
    conn: &Connection,
    limit: usize,
    offset: usize,
) -> CapsuleResult<Vec<CapsuleSnapshot>> {
    let mut stmt = conn
        .prepare(
            "SELECT data FROM capsules
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1 OFFSET ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64, offset as i64], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut capsules = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        capsules.push(parse_json("capsules.data", &raw)?);
    }
    Ok(capsules)
}

pub fn count_capsules(conn: &Connection) -> CapsuleResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM capsules", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(super::to_count(count))
}
