//! Composed read views over the header and the four ledgers.

use rusqlite::Connection;

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{
    Citations, Evolution, ProvenanceAggregate, ValidationRecord, VersionHistory,
};

use super::{citation_ops, provenance_ops, relation_ops, validation_ops, version_ops};

/// Version history with the stored counter and current pointer.
pub fn load_history(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<VersionHistory>> {
    let Some(header) = provenance_ops::get_header(conn, capsule_id)? else {
        return Ok(None);
    };
    Ok(Some(VersionHistory {
        capsule_id: header.capsule_id,
        versions: version_ops::load_versions(conn, capsule_id)?,
        current_version: Some(header.current_version),
        version_count: header.version_count,
    }))
}

pub fn load_evolution(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<Evolution>> {
    if !provenance_ops::is_registered(conn, capsule_id)? {
        return Ok(None);
    }
    let relations = relation_ops::load_outgoing(conn, capsule_id)?;
    Ok(Some(Evolution::replay(capsule_id, relations)))
}

pub fn load_validation_record(
    conn: &Connection,
    capsule_id: &str,
) -> CapsuleResult<Option<ValidationRecord>> {
    if !provenance_ops::is_registered(conn, capsule_id)? {
        return Ok(None);
    }
    Ok(Some(ValidationRecord {
        capsule_id: capsule_id.to_string(),
        validations: validation_ops::load_validations(conn, capsule_id)?,
    }))
}

pub fn load_citations(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<Citations>> {
    let Some(header) = provenance_ops::get_header(conn, capsule_id)? else {
        return Ok(None);
    };
    Ok(Some(Citations {
        capsule_id: header.capsule_id,
        count: header.citation_count,
        citations: citation_ops::load_citations(conn, capsule_id)?,
    }))
}

/// Header plus every ledger. Callers run this in one read transaction so
/// the parts agree with each other.
pub fn load_aggregate(
    conn: &Connection,
    capsule_id: &str,
) -> CapsuleResult<Option<ProvenanceAggregate>> {
    let Some(header) = provenance_ops::get_header(conn, capsule_id)? else {
        return Ok(None);
    };

    let versions = VersionHistory {
        capsule_id: header.capsule_id.clone(),
        versions: version_ops::load_versions(conn, capsule_id)?,
        current_version: Some(header.current_version.clone()),
        version_count: header.version_count,
    };
    let evolution = Evolution::replay(capsule_id, relation_ops::load_outgoing(conn, capsule_id)?);
    let validations = ValidationRecord {
        capsule_id: header.capsule_id.clone(),
        validations: validation_ops::load_validations(conn, capsule_id)?,
    };
    let citations = Citations {
        capsule_id: header.capsule_id.clone(),
        count: header.citation_count,
        citations: citation_ops::load_citations(conn, capsule_id)?,
    };

    Ok(Some(ProvenanceAggregate {
        capsule_id: header.capsule_id,
        source: header.source,
        versions,
        evolution,
        validations,
        citations,
        created_at: header.created_at,
        updated_at: header.updated_at,
    }))
}
