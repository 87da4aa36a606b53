//! Global overview graph built from the summary projection.

use capsule_core::models::{OverviewGraph, OverviewNode, ProvenanceSummary};

pub fn build_overview(summary: Vec<ProvenanceSummary>) -> OverviewGraph {
    let nodes: Vec<OverviewNode> = summary
        .into_iter()
        .map(|row| OverviewNode {
            verified: row.verified_count > 0,
            id: row.capsule_id,
            node_type: row.source_type,
            current_version: row.current_version,
            version_count: row.version_count,
            citation_count: row.citation_count,
        })
        .collect();
    OverviewGraph {
        total_capsules: nodes.len(),
        nodes,
    }
}
