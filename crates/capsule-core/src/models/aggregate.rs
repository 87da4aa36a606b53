//! The composed provenance read-model and its projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::citation::Citations;
use super::evolution::Evolution;
use super::validation::ValidationRecord;
use super::version::VersionHistory;
use crate::errors::{CapsuleError, CapsuleResult};

/// Where a capsule came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub source_type: String,
    pub source_id: Option<String>,
    /// Opaque payload supplied at registration.
    pub data: serde_json::Value,
}

/// Input for registering a capsule's provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub capsule_id: String,
    pub source: SourceDescriptor,
    pub initial_version: String,
    pub initial_changes: String,
    pub initial_reason: String,
    pub author: String,
    pub fingerprint: String,
}

impl NewRegistration {
    pub fn validate(&self) -> CapsuleResult<()> {
        if self.capsule_id.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "capsule_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.initial_version.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "initial_version",
                reason: "version label must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// The stored per-capsule row: source descriptor plus denormalized counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceHeader {
    pub id: String,
    pub capsule_id: String,
    pub source: SourceDescriptor,
    pub current_version: String,
    pub version_count: u64,
    pub citation_count: u64,
    pub verified_count: u64,
    pub disputed_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Source descriptor + four ledgers for one capsule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceAggregate {
    pub capsule_id: String,
    pub source: SourceDescriptor,
    pub versions: VersionHistory,
    pub evolution: Evolution,
    pub validations: ValidationRecord,
    pub citations: Citations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of looking up a capsule that the collaborator knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProvenanceLookup {
    Registered(Box<ProvenanceAggregate>),
    /// The capsule exists but its provenance was never registered.
    NotRegistered { capsule_id: String },
}

/// One row of the cross-capsule summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceSummary {
    pub capsule_id: String,
    pub source_type: String,
    pub current_version: String,
    pub version_count: u64,
    pub citation_count: u64,
    pub verified_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Stored counter vs. ledger-derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterCheck {
    pub stored: u64,
    pub derived: u64,
}

impl CounterCheck {
    pub fn is_consistent(&self) -> bool {
        self.stored == self.derived
    }
}

/// Replay of every ledger against the denormalized counters of one capsule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterAudit {
    pub capsule_id: String,
    pub versions: CounterCheck,
    pub citations: CounterCheck,
    pub verified: CounterCheck,
    pub disputed: CounterCheck,
    /// Stored current-version pointer matches the last appended label.
    pub current_version_matches: bool,
}

impl CounterAudit {
    pub fn is_consistent(&self) -> bool {
        self.versions.is_consistent()
            && self.citations.is_consistent()
            && self.verified.is_consistent()
            && self.disputed.is_consistent()
            && self.current_version_matches
    }
}
