//! Forward traversal over outgoing evolution relations.
//!
//! Breadth-first from the root. A node is marked visited when admitted, so
//! cycles terminate. Admission stops once the node budget is spent; nodes
//! at `max_depth` are admitted but not expanded.

use std::collections::{HashSet, VecDeque};

use capsule_core::constants::UNKNOWN_NODE_TYPE;
use capsule_core::errors::CapsuleResult;
use capsule_core::models::{EvolutionGraph, GraphEdge, GraphNode, ProvenanceHeader};
use capsule_core::traits::IProvenanceStorage;

/// Depth and node limits applied to one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalBounds {
    pub max_depth: usize,
    pub max_nodes: usize,
}

/// Traverse from `root_id`. An unregistered root yields an empty graph.
pub fn traverse(
    storage: &dyn IProvenanceStorage,
    root_id: &str,
    bounds: TraversalBounds,
) -> CapsuleResult<EvolutionGraph> {
    let mut graph = EvolutionGraph::empty(root_id, bounds.max_depth);
    let Some(root) = storage.get_header(root_id)? else {
        return Ok(graph);
    };
    let budget = bounds.max_nodes.max(1);

    let mut visited = HashSet::new();
    visited.insert(root_id.to_string());
    graph.nodes.push(node_for(root_id, Some(&root), 0));

    let mut queue = VecDeque::new();
    queue.push_back((root_id.to_string(), 0usize));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= bounds.max_depth {
            continue;
        }

        for relation in storage.outgoing_relations(&current)? {
            let target = relation.related_capsule_id;

            if !visited.contains(&target) {
                if graph.nodes.len() >= budget {
                    graph.truncated = true;
                    continue;
                }
                let header = storage.get_header(&target)?;
                visited.insert(target.clone());
                graph.nodes.push(node_for(&target, header.as_ref(), depth + 1));
                if header.is_some() {
                    queue.push_back((target.clone(), depth + 1));
                }
            }

            graph.edges.push(GraphEdge {
                source: current.clone(),
                target,
                relation_type: relation.relation_type,
                strength: relation.strength,
            });
        }
    }

    Ok(graph)
}

fn node_for(id: &str, header: Option<&ProvenanceHeader>, depth: usize) -> GraphNode {
    match header {
        Some(header) => GraphNode {
            id: id.to_string(),
            node_type: header.source.source_type.clone(),
            registered: true,
            current_version: Some(header.current_version.clone()),
            version_count: header.version_count,
            depth,
        },
        None => GraphNode {
            id: id.to_string(),
            node_type: UNKNOWN_NODE_TYPE.to_string(),
            registered: false,
            current_version: None,
            version_count: 0,
            depth,
        },
    }
}
