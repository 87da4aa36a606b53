//! Citation ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CapsuleError, CapsuleResult};

/// "source cites target", immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source_capsule_id: String,
    pub target_capsule_id: String,
    pub context: String,
    pub strength: f64,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending a citation. Self-citation is permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCitation {
    pub source_capsule_id: String,
    pub target_capsule_id: String,
    pub context: String,
    pub strength: f64,
}

impl NewCitation {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_capsule_id: source.into(),
            target_capsule_id: target.into(),
            context: String::new(),
            strength: 1.0,
        }
    }

    pub fn validate(&self) -> CapsuleResult<()> {
        if self.source_capsule_id.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "source_capsule_id",
                reason: "must not be empty".to_string(),
            });
        }
        CapsuleError::check_range("strength", self.strength, 0.0, 1.0)
    }
}

/// Citations received by one capsule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citations {
    pub capsule_id: String,
    /// Stored running counter.
    pub count: u64,
    pub citations: Vec<Citation>,
}

impl Citations {
    pub fn new(capsule_id: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            count: 0,
            citations: Vec::new(),
        }
    }

    /// Citing capsule ids in append order, one entry per citation.
    pub fn citing_capsules(&self) -> Vec<String> {
        self.citations
            .iter()
            .map(|c| c.source_capsule_id.clone())
            .collect()
    }
}

/// Result of appending a citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationReceipt {
    pub citation: Citation,
    /// Target's citation count after the append.
    pub target_citations: u64,
}
