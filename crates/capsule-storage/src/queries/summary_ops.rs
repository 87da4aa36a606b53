//! Cross-capsule projection of the provenance headers.

use rusqlite::{params, Connection};

use capsule_core::errors::CapsuleResult;
use capsule_core::models::ProvenanceSummary;

use super::{parse_ts, to_count};
use crate::to_storage_err;

/// Registered capsules, most recently registered first.
pub fn summary(conn: &Connection, limit: usize) -> CapsuleResult<Vec<ProvenanceSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT capsule_id, source_type, current_version, version_count,
                    citation_count, verified_count, created_at
             FROM provenance
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (capsule_id, source_type, current_version, versions, citations, verified, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(ProvenanceSummary {
            capsule_id,
            source_type,
            current_version,
            version_count: to_count(versions),
            citation_count: to_count(citations),
            verified_count: to_count(verified),
            created_at: parse_ts(&created_at)?,
        });
    }
    Ok(out)
}

pub fn count_registered(conn: &Connection) -> CapsuleResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM provenance", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(to_count(count))
}
