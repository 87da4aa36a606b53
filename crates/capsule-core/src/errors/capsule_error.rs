use super::StorageError;

/// Result alias used across the workspace.
pub type CapsuleResult<T> = Result<T, CapsuleError>;

/// Coarse error classes callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Capsule or aggregate absent.
    NotFound,
    /// Duplicate registration.
    AlreadyExists,
    /// Rejected before any write.
    InvalidInput,
    /// Persistence unavailable or the unit of work rolled back.
    StoreFailure,
}

/// Top-level error for every capsule operation.
#[derive(Debug, thiserror::Error)]
pub enum CapsuleError {
    #[error("capsule not found: {id}")]
    CapsuleNotFound { id: String },

    #[error("provenance not registered for capsule: {id}")]
    NotRegistered { id: String },

    #[error("provenance already registered for capsule: {id}")]
    AlreadyRegistered { id: String },

    #[error("capsule already exists: {id}")]
    CapsuleExists { id: String },

    #[error("invalid relation kind: {kind}")]
    InvalidRelationKind { kind: String },

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),
}

impl CapsuleError {
    /// The class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::CapsuleNotFound { .. } | Self::NotRegistered { .. } => ErrorClass::NotFound,
            Self::AlreadyRegistered { .. } | Self::CapsuleExists { .. } => {
                ErrorClass::AlreadyExists
            }
            Self::InvalidRelationKind { .. }
            | Self::OutOfRange { .. }
            | Self::InvalidInput { .. } => ErrorClass::InvalidInput,
            Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_) => ErrorClass::StoreFailure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }

    /// Check that `value` lies in `[min, max]`; NaN is rejected.
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> CapsuleResult<()> {
        if value.is_nan() || value < min || value > max {
            return Err(Self::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
