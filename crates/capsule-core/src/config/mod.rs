pub mod defaults;
mod observability_config;
mod registration_config;
mod storage_config;
mod summary_config;
mod traversal_config;

pub use observability_config::ObservabilityConfig;
pub use registration_config::RegistrationConfig;
pub use storage_config::StorageConfig;
pub use summary_config::SummaryConfig;
pub use traversal_config::TraversalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{CapsuleError, CapsuleResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    pub storage: StorageConfig,
    pub traversal: TraversalConfig,
    pub summary: SummaryConfig,
    pub registration: RegistrationConfig,
    pub observability: ObservabilityConfig,
}

impl CapsuleConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(input: &str) -> CapsuleResult<Self> {
        toml::from_str(input).map_err(|e| CapsuleError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &std::path::Path) -> CapsuleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CapsuleError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}
