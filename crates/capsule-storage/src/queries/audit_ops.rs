//! Recompute counters from the ledgers and compare with the stored header.

use rusqlite::Connection;

use capsule_core::errors::CapsuleResult;
use capsule_core::models::{CounterAudit, CounterCheck, ValidationStatus};

use super::{citation_ops, provenance_ops, validation_ops, version_ops};

pub fn audit_counters(conn: &Connection, capsule_id: &str) -> CapsuleResult<Option<CounterAudit>> {
    let Some(header) = provenance_ops::get_header(conn, capsule_id)? else {
        return Ok(None);
    };

    let last_label = version_ops::last_version_label(conn, capsule_id)?;

    Ok(Some(CounterAudit {
        capsule_id: header.capsule_id,
        versions: CounterCheck {
            stored: header.version_count,
            derived: version_ops::count_versions(conn, capsule_id)?,
        },
        citations: CounterCheck {
            stored: header.citation_count,
            derived: citation_ops::count_citations(conn, capsule_id)?,
        },
        verified: CounterCheck {
            stored: header.verified_count,
            derived: validation_ops::count_with_status(
                conn,
                capsule_id,
                ValidationStatus::Verified,
            )?,
        },
        disputed: CounterCheck {
            stored: header.disputed_count,
            derived: validation_ops::count_with_status(
                conn,
                capsule_id,
                ValidationStatus::Disputed,
            )?,
        },
        current_version_matches: last_label.as_deref() == Some(header.current_version.as_str()),
    }))
}
