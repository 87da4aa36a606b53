//! Caller-facing inputs. Relation kinds and validation statuses arrive as
//! strings and are mapped to their closed enums here.

use serde::{Deserialize, Serialize};

/// Register a capsule's provenance. Unset fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub capsule_id: String,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
    pub source_data: serde_json::Value,
    pub initial_version: Option<String>,
    pub author: Option<String>,
}

impl RegisterRequest {
    pub fn new(capsule_id: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRequest {
    pub capsule_id: String,
    pub related_capsule_id: String,
    /// One of parent, child, branch, merge, inspired_by, supports, contradicts.
    pub relation_type: String,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl RelationRequest {
    pub fn new(
        capsule_id: impl Into<String>,
        related_capsule_id: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            related_capsule_id: related_capsule_id.into(),
            relation_type: relation_type.into(),
            strength: None,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub capsule_id: String,
    pub validator: String,
    /// Unrecognized values are recorded as pending.
    pub status: String,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub score: Option<f64>,
}

impl ValidationRequest {
    pub fn new(
        capsule_id: impl Into<String>,
        validator: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            validator: validator.into(),
            status: status.into(),
            evidence: String::new(),
            comments: String::new(),
            score: None,
        }
    }
}

/// Record a revision of capsule content as a new version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionRequest {
    pub capsule_id: String,
    pub version: String,
    #[serde(default)]
    pub changes: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Per-id outcome of a batch registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Registered,
    AlreadyRegistered,
    CapsuleNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub capsule_id: String,
    pub status: BatchStatus,
}
