//! Capsule snapshot as seen by provenance and the evaluator.
//!
//! The capsule record itself belongs to the capsule collaborator; this crate
//! only reads snapshots and writes the counter/score fields back through
//! [`CapsuleUpdate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::datm::{DatmScore, Grade};
use crate::constants::INITIAL_CAPSULE_VERSION;

/// A fully populated capsule snapshot. Optional inputs carry explicit defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapsuleSnapshot {
    pub id: String,
    pub title: String,
    pub domain: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub insight: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub applicability: String,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default = "default_half")]
    pub reproducibility: f64,
    #[serde(default = "default_half")]
    pub impact_potential: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_source_type")]
    pub source_type: String,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default = "default_license")]
    pub license: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub datm_score: Option<DatmScore>,
    #[serde(default)]
    pub citations: u64,
    #[serde(default)]
    pub validations: u64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_half() -> f64 {
    0.5
}

fn default_confidence() -> f64 {
    0.7
}

fn default_source_type() -> String {
    "discussion".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_version() -> String {
    INITIAL_CAPSULE_VERSION.to_string()
}

impl CapsuleSnapshot {
    /// Minimal snapshot with every optional field at its default.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        domain: impl Into<String>,
        insight: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            domain: domain.into(),
            topics: Vec::new(),
            insight: insight.into(),
            evidence: Vec::new(),
            action_items: Vec::new(),
            applicability: String::new(),
            limitations: Vec::new(),
            reproducibility: default_half(),
            impact_potential: default_half(),
            confidence: default_confidence(),
            source_type: default_source_type(),
            source_id: None,
            authors: Vec::new(),
            license: default_license(),
            version: default_version(),
            datm_score: None,
            citations: 0,
            validations: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overall score from the stored DATM score, if one has been assigned.
    pub fn overall_score(&self) -> Option<f64> {
        self.datm_score.map(|s| s.average() * self.confidence)
    }

    pub fn overall_grade(&self) -> Option<Grade> {
        self.overall_score().map(Grade::from_overall)
    }

    /// Whether the capsule has been revised past its initial version.
    /// `1.0.0` and `v1.0.0` both count as initial.
    pub fn is_revised(&self) -> bool {
        let label = self.version.trim();
        let label = label.strip_prefix('v').unwrap_or(label);
        label != INITIAL_CAPSULE_VERSION
    }
}

/// Fields provenance may write back onto a capsule. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapsuleUpdate {
    pub citations: Option<u64>,
    pub validations: Option<u64>,
    pub datm_score: Option<DatmScore>,
    pub version: Option<String>,
    /// `citations` and `validations` mirror the provenance counters. A store
    /// that holds those counters re-reads them in the same write, so the
    /// values carried here only apply when no provenance row exists.
    #[serde(default)]
    pub from_ledger: bool,
}

impl CapsuleUpdate {
    /// Mirror of the citation counter, resolved against the ledger at write time.
    pub fn ledger_citations(observed: u64) -> Self {
        Self {
            citations: Some(observed),
            from_ledger: true,
            ..Default::default()
        }
    }

    /// Mirror of the verified-validation counter, resolved against the ledger at write time.
    pub fn ledger_validations(observed: u64) -> Self {
        Self {
            validations: Some(observed),
            from_ledger: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_none()
            && self.validations.is_none()
            && self.datm_score.is_none()
            && self.version.is_none()
    }

    /// Apply the set fields to a snapshot and bump `updated_at`.
    pub fn apply_to(&self, capsule: &mut CapsuleSnapshot) {
        if let Some(citations) = self.citations {
            capsule.citations = citations;
        }
        if let Some(validations) = self.validations {
            capsule.validations = validations;
        }
        if let Some(score) = self.datm_score {
            capsule.datm_score = Some(score);
        }
        if let Some(version) = &self.version {
            capsule.version = version.clone();
        }
        capsule.updated_at = Utc::now();
    }
}
