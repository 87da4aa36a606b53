//! Citation ledger appends and reads. Citations are keyed by their target.

use chrono::Utc;
use rusqlite::{params, Connection};

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{Citation, CitationReceipt, NewCitation};

use super::provenance_ops::{require_registered, touch};
use super::{format_ts, parse_ts, to_count};
use crate::to_storage_err;

/// Append a citation to the target's ledger and bump its `citation_count`.
/// Returns the record plus the target's new count.
pub fn append_citation(conn: &Connection, input: &NewCitation) -> CapsuleResult<CitationReceipt> {
    require_registered(conn, &input.target_capsule_id)?;
    let now = Utc::now();

    conn.execute(
        "INSERT INTO capsule_citations
             (source_capsule_id, target_capsule_id, context, strength, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            input.source_capsule_id,
            input.target_capsule_id,
            input.context,
            input.strength,
            format_ts(&now),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    touch(conn, &input.target_capsule_id, Some("citation_count"), None, &now)?;

    let target_citations: i64 = conn
        .query_row(
            "SELECT citation_count FROM provenance WHERE capsule_id = ?1",
            params![input.target_capsule_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(CitationReceipt {
        citation: Citation {
            source_capsule_id: input.source_capsule_id.clone(),
            target_capsule_id: input.target_capsule_id.clone(),
            context: input.context.clone(),
            strength: input.strength,
            timestamp: now,
        },
        target_citations: to_count(target_citations),
    })
}

/// Citations received by `capsule_id` in append order.
pub fn load_citations(conn: &Connection, capsule_id: &str) -> CapsuleResult<Vec<Citation>> {
    let mut stmt = conn
        .prepare(
            "SELECT source_capsule_id, target_capsule_id, context, strength, created_at
             FROM capsule_citations WHERE target_capsule_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![capsule_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut citations = Vec::new();
    for row in rows {
        let (source, target, context, strength, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        citations.push(Citation {
            source_capsule_id: source,
            target_capsule_id: target,
            context,
            strength,
            timestamp: parse_ts(&created_at)?,
        });
    }
    Ok(citations)
}

pub fn count_citations(conn: &Connection, capsule_id: &str) -> CapsuleResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM capsule_citations WHERE target_capsule_id = ?1",
            params![capsule_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(to_count(count))
}
