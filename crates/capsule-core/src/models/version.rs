//! Version ledger records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CapsuleError, CapsuleResult};

/// One immutable entry of a capsule's version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapsuleVersion {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub changes: String,
    pub reason: String,
    pub author: String,
    /// DATM score snapshot keyed by axis name. May be empty.
    pub datm_score: BTreeMap<String, f64>,
    /// Content fingerprint at the time of this version. May be empty.
    pub fingerprint: String,
}

/// Input for appending a version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVersion {
    pub capsule_id: String,
    pub version: String,
    pub changes: String,
    pub reason: String,
    pub author: String,
    pub datm_score: BTreeMap<String, f64>,
    pub fingerprint: String,
}

impl NewVersion {
    pub fn validate(&self) -> CapsuleResult<()> {
        if self.version.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "version",
                reason: "version label must not be empty".to_string(),
            });
        }
        for (axis, value) in &self.datm_score {
            if value.is_nan() || !(0.0..=100.0).contains(value) {
                return Err(CapsuleError::InvalidInput {
                    field: "datm_score",
                    reason: format!("{axis} = {value} is outside [0, 100]"),
                });
            }
        }
        Ok(())
    }
}

/// All versions of one capsule in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionHistory {
    pub capsule_id: String,
    pub versions: Vec<CapsuleVersion>,
    /// Label of the most recently appended version.
    pub current_version: Option<String>,
    pub version_count: u64,
}

impl VersionHistory {
    pub fn new(capsule_id: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            versions: Vec::new(),
            current_version: None,
            version_count: 0,
        }
    }

    /// Append in memory, keeping count and current pointer in step.
    pub fn push(&mut self, version: CapsuleVersion) {
        self.current_version = Some(version.version.clone());
        self.version_count += 1;
        self.versions.push(version);
    }

    /// Most recent record carrying `label`. Labels are not unique.
    pub fn get_version(&self, label: &str) -> Option<&CapsuleVersion> {
        self.versions.iter().rev().find(|v| v.version == label)
    }

    pub fn latest(&self) -> Option<&CapsuleVersion> {
        self.versions.last()
    }
}
