use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{MAX_TRAVERSAL_DEPTH, MAX_TRAVERSAL_NODES};

/// Evolution graph traversal bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Depth used when the caller does not ask for one.
    pub default_depth: usize,
    /// Largest depth a caller may request.
    pub max_depth: usize,
    /// Node budget per traversal.
    pub max_nodes: usize,
}

impl TraversalConfig {
    /// Clamp a requested depth into `[0, max_depth]`.
    pub fn clamp_depth(&self, requested: usize) -> usize {
        requested.min(self.max_depth.min(MAX_TRAVERSAL_DEPTH))
    }

    /// Effective node budget, never zero.
    pub fn node_budget(&self) -> usize {
        self.max_nodes.clamp(1, MAX_TRAVERSAL_NODES)
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            default_depth: defaults::DEFAULT_TRAVERSAL_DEPTH,
            max_depth: defaults::DEFAULT_TRAVERSAL_MAX_DEPTH,
            max_nodes: defaults::DEFAULT_TRAVERSAL_MAX_NODES,
        }
    }
}
