//! SQL operations, one module per table family. Every function takes a
//! plain `&Connection` so the engine decides the transaction boundary.

pub mod aggregate_ops;
pub mod audit_ops;
pub mod capsule_ops;
pub mod citation_ops;
pub mod provenance_ops;
pub mod relation_ops;
pub mod summary_ops;
pub mod validation_ops;
pub mod version_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use capsule_core::errors::{CapsuleError, CapsuleResult, StorageError};

/// Stored timestamp format: RFC 3339, UTC, microsecond precision.
pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> CapsuleResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(format!("bad timestamp {raw:?}: {e}")))
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    column: &str,
    raw: &str,
) -> CapsuleResult<T> {
    serde_json::from_str(raw).map_err(|e| corrupt(format!("bad JSON in {column}: {e}")))
}

/// SQLite stores counters as i64; they are never negative.
pub(crate) fn to_count(raw: i64) -> u64 {
    raw.max(0) as u64
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

pub(crate) fn corrupt(details: String) -> CapsuleError {
    CapsuleError::StorageError(StorageError::CorruptRow { details })
}
