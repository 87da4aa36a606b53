//! Validation ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CapsuleError, CapsuleResult};

/// The closed set of validation statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    Verified,
    Disputed,
    Expired,
}

impl ValidationStatus {
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "disputed" => Some(Self::Disputed),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Unrecognized input falls back to `Pending`. The flag reports whether
    /// the input was recognized.
    pub fn parse_lenient(s: &str) -> (Self, bool) {
        match Self::from_str_name(s) {
            Some(status) => (status, true),
            None => (Self::Pending, false),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Disputed => "disputed",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable third-party verification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub validator: String,
    pub status: ValidationStatus,
    pub evidence: String,
    pub comments: String,
    pub score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending a validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewValidation {
    pub capsule_id: String,
    pub validator: String,
    pub status: ValidationStatus,
    pub evidence: String,
    pub comments: String,
    pub score: Option<f64>,
}

impl NewValidation {
    pub fn new(
        capsule_id: impl Into<String>,
        validator: impl Into<String>,
        status: ValidationStatus,
    ) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            validator: validator.into(),
            status,
            evidence: String::new(),
            comments: String::new(),
            score: None,
        }
    }

    pub fn validate(&self) -> CapsuleResult<()> {
        if self.validator.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "validator",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(score) = self.score {
            CapsuleError::check_range("score", score, 0.0, 100.0)?;
        }
        Ok(())
    }
}

/// All validations of one capsule. Counts are derived from the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub capsule_id: String,
    pub validations: Vec<Validation>,
}

impl ValidationRecord {
    pub fn new(capsule_id: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            validations: Vec::new(),
        }
    }

    pub fn count_status(&self, status: ValidationStatus) -> u64 {
        self.validations.iter().filter(|v| v.status == status).count() as u64
    }

    pub fn verified_count(&self) -> u64 {
        self.count_status(ValidationStatus::Verified)
    }

    pub fn disputed_count(&self) -> u64 {
        self.count_status(ValidationStatus::Disputed)
    }

    /// At least one verification on record.
    pub fn is_verified(&self) -> bool {
        self.verified_count() > 0
    }
}
