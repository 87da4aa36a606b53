//! Validation ledger appends and reads.

use chrono::Utc;
use rusqlite::{params, Connection};

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{NewValidation, Validation, ValidationStatus};

use super::provenance_ops::{require_registered, touch};
use super::{corrupt, format_ts, parse_ts, to_count};
use crate::to_storage_err;

/// Append a validation. `verified` and `disputed` bump their counters.
pub fn append_validation(conn: &Connection, input: &NewValidation) -> CapsuleResult<Validation> {
    require_registered(conn, &input.capsule_id)?;
    let now = Utc::now();

    conn.execute(
        "INSERT INTO capsule_validations
             (capsule_id, validator, status, evidence, comments, score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.capsule_id,
            input.validator,
            input.status.as_str(),
            input.evidence,
            input.comments,
            input.score,
            format_ts(&now),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let counter = match input.status {
        ValidationStatus::Verified => Some("verified_count"),
        ValidationStatus::Disputed => Some("disputed_count"),
        ValidationStatus::Pending | ValidationStatus::Expired => None,
    };
    touch(conn, &input.capsule_id, counter, None, &now)?;

    Ok(Validation {
        validator: input.validator.clone(),
        status: input.status,
        evidence: input.evidence.clone(),
        comments: input.comments.clone(),
        score: input.score,
        timestamp: now,
    })
}

/// All validations of a capsule in append order.
pub fn load_validations(conn: &Connection, capsule_id: &str) -> CapsuleResult<Vec<Validation>> {
    let mut stmt = conn
        .prepare(
            "SELECT validator, status, evidence, comments, score, created_at
             FROM capsule_validations WHERE capsule_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![capsule_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut validations = Vec::new();
    for row in rows {
        let (validator, status, evidence, comments, score, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let status = ValidationStatus::from_str_name(&status)
            .ok_or_else(|| corrupt(format!("unknown validation status {status:?}")))?;
        validations.push(Validation {
            validator,
            status,
            evidence,
            comments,
            score,
            timestamp: parse_ts(&created_at)?,
        });
    }
    Ok(validations)
}

pub fn count_with_status(
    conn: &Connection,
    capsule_id: &str,
    status: ValidationStatus,
) -> CapsuleResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM capsule_validations WHERE capsule_id = ?1 AND status = ?2",
            params![capsule_id, status.as_str()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(to_count(count))
}
