//! Provenance header rows: registration and counter bookkeeping.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use capsule_core::errors::{CapsuleError, CapsuleResult};
use capsule_core::models::{
    CapsuleVersion, Citations, Evolution, NewRegistration, NewVersion, ProvenanceAggregate,
    ProvenanceHeader, SourceDescriptor, ValidationRecord, VersionHistory,
};

use super::{format_ts, is_unique_violation, parse_json, parse_ts, to_count, version_ops};
use crate::to_storage_err;

const HEADER_COLUMNS: &str = "id, capsule_id, source_type, source_id, source_data,
     current_version, version_count, citation_count, verified_count, disputed_count,
     created_at, updated_at";

/// Raw header row before JSON and timestamp decoding.
struct HeaderRow {
    id: String,
    capsule_id: String,
    source_type: String,
    source_id: Option<String>,
    source_data: String,
    current_version: String,
    version_count: i64,
    citation_count: i64,
    verified_count: i64,
    disputed_count: i64,
    created_at: String,
    updated_at: String,
}

impl HeaderRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            capsule_id: row.get(1)?,
            source_type: row.get(2)?,
            source_id: row.get(3)?,
            source_data: row.get(4)?,
            current_version: row.get(5)?,
            version_count: row.get(6)?,
            citation_count: row.get(7)?,
            verified_count: row.get(8)?,
            disputed_count: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn decode(self) -> CapsuleResult<ProvenanceHeader> {
        Ok(ProvenanceHeader {
            id: self.id,
            capsule_id: self.capsule_id,
            source: SourceDescriptor {
                source_type: self.source_type,
                source_id: self.source_id,
                data: parse_json("provenance.source_data", &self.source_data)?,
            },
            current_version: self.current_version,
            version_count: to_count(self.version_count),
            citation_count: to_count(self.citation_count),
            verified_count: to_count(self.verified_count),
            disputed_count: to_count(self.disputed_count),
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

pub fn get_header(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<ProvenanceHeader>> {
    let row = conn
        .query_row(
            &format!("SELECT {HEADER_COLUMNS} FROM provenance WHERE capsule_id = ?1"),
            params![capsule_id],
            HeaderRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(HeaderRow::decode).transpose()
}

pub fn is_registered(conn: &Connection, capsule_id: &str) -> CapsuleResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM provenance WHERE capsule_id = ?1",
            params![capsule_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(found.is_some())
}

/// Fail with `NotRegistered` unless `capsule_id` has a provenance row.
pub fn require_registered(conn: &Connection, capsule_id: &str) -> CapsuleResult<()> {
    if is_registered(conn, capsule_id)? {
        Ok(())
    } else {
        Err(CapsuleError::NotRegistered {
            id: capsule_id.to_string(),
        })
    }
}

/// Create the provenance row and its initial version record.
/// Callers run this inside an immediate transaction.
pub fn insert_registration(
    conn: &Connection,
    registration: &NewRegistration,
) -> CapsuleResult<ProvenanceAggregate> {
    if is_registered(conn, &registration.capsule_id)? {
        return Err(already_registered(&registration.capsule_id));
    }

    let now = Utc::now();
    let ts = format_ts(&now);
    let source_data = serde_json::to_string(&registration.source.data)?;

    conn.execute(
        "INSERT INTO provenance (id, capsule_id, source_type, source_id, source_data,
             current_version, version_count, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
        params![
            uuid::Uuid::new_v4().to_string(),
            registration.capsule_id,
            registration.source.source_type,
            registration.source.source_id,
            source_data,
            registration.initial_version,
            ts,
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            already_registered(&registration.capsule_id)
        } else {
            to_storage_err(e.to_string())
        }
    })?;

    let initial = NewVersion {
        capsule_id: registration.capsule_id.clone(),
        version: registration.initial_version.clone(),
        changes: registration.initial_changes.clone(),
        reason: registration.initial_reason.clone(),
        author: registration.author.clone(),
        datm_score: Default::default(),
        fingerprint: registration.fingerprint.clone(),
    };
    let version = version_ops::append_version_at(conn, &initial, now)?;

    Ok(fresh_aggregate(registration, version, now))
}

/// Bump a counter column, set `updated_at`, and optionally the current version.
pub(crate) fn touch(
    conn: &Connection,
    capsule_id: &str,
    counter: Option<&str>,
    current_version: Option<&str>,
    at: &DateTime<Utc>,
) -> CapsuleResult<()> {
    let counter_clause = match counter {
        Some(column) => format!(", {column} = {column} + 1"),
        None => String::new(),
    };
    let changed = conn
        .execute(
            &format!(
                "UPDATE provenance
                 SET updated_at = ?2,
                     current_version = COALESCE(?3, current_version){counter_clause}
                 WHERE capsule_id = ?1"
            ),
            params![capsule_id, format_ts(at), current_version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(CapsuleError::NotRegistered {
            id: capsule_id.to_string(),
        });
    }
    Ok(())
}

fn fresh_aggregate(
    registration: &NewRegistration,
    initial: CapsuleVersion,
    at: DateTime<Utc>,
) -> ProvenanceAggregate {
    let capsule_id = registration.capsule_id.clone();
    let mut versions = VersionHistory::new(capsule_id.clone());
    versions.push(initial);
    ProvenanceAggregate {
        source: registration.source.clone(),
        versions,
        evolution: Evolution::new(capsule_id.clone()),
        validations: ValidationRecord::new(capsule_id.clone()),
        citations: Citations::new(capsule_id.clone()),
        capsule_id,
        created_at: at,
        updated_at: at,
    }
}

fn already_registered(capsule_id: &str) -> CapsuleError {
    CapsuleError::AlreadyRegistered {
        id: capsule_id.to_string(),
    }
}
