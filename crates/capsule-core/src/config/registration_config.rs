use serde::{Deserialize, Serialize};

use super::defaults;

/// Defaults applied when a capsule is registered without explicit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Label of the implicit initial version.
    pub initial_version: String,
    pub author: String,
    pub source_type: String,
    /// Reason recorded on the implicit initial version.
    pub initial_reason: String,
    /// Change description recorded on the implicit initial version.
    pub initial_changes: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            initial_version: defaults::DEFAULT_INITIAL_VERSION.to_string(),
            author: defaults::DEFAULT_AUTHOR.to_string(),
            source_type: defaults::DEFAULT_SOURCE_TYPE.to_string(),
            initial_reason: defaults::DEFAULT_INITIAL_REASON.to_string(),
            initial_changes: defaults::DEFAULT_INITIAL_CHANGES.to_string(),
        }
    }
}
