//! Evolution graph shapes returned by traversal and overview queries.

use serde::{Deserialize, Serialize};

use super::evolution::RelationKind;

/// A capsule reached by traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Source type of the aggregate, or `unknown` when unregistered.
    pub node_type: String,
    pub registered: bool,
    pub current_version: Option<String>,
    pub version_count: u64,
    /// Hops from the root.
    pub depth: usize,
}

/// A relation event between two returned nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation_type: RelationKind,
    pub strength: f64,
}

/// Result of a bounded breadth-first traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionGraph {
    pub root_id: String,
    /// Depth bound actually applied.
    pub depth: usize,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// The node budget cut the traversal short.
    pub truncated: bool,
}

impl EvolutionGraph {
    pub fn empty(root_id: impl Into<String>, depth: usize) -> Self {
        Self {
            root_id: root_id.into(),
            depth,
            nodes: Vec::new(),
            edges: Vec::new(),
            truncated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// A node of the global overview graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewNode {
    pub id: String,
    pub node_type: String,
    pub current_version: String,
    pub version_count: u64,
    pub citation_count: u64,
    pub verified: bool,
}

/// Global overview built from the summary projection, without traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewGraph {
    pub total_capsules: usize,
    pub nodes: Vec<OverviewNode>,
}
