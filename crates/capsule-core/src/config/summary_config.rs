use serde::{Deserialize, Serialize};

use super::defaults;

/// Limits for the cross-capsule summary query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl SummaryConfig {
    /// Clamp a requested limit into `[1, max_limit]`.
    pub fn clamp_limit(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_limit.max(1))
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_SUMMARY_LIMIT,
            max_limit: defaults::DEFAULT_SUMMARY_MAX_LIMIT,
        }
    }
}
