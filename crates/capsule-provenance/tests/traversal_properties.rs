//! Property tests: traversal terminates within its bounds on arbitrary graphs.

use std::collections::HashSet;

use proptest::prelude::*;

use capsule_core::config::CapsuleConfig;
use capsule_provenance::graph::{traverse, TraversalBounds};
use capsule_provenance::{ProvenanceEngine, RegisterRequest, RelationRequest};
use capsule_storage::StorageEngine;

const NODES: usize = 8;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_traversal_respects_bounds(
        edges in prop::collection::vec((0..NODES, 0..NODES), 0..30),
        max_depth in 0usize..5,
        max_nodes in 1usize..10,
    ) {
        let store = std::sync::Arc::new(StorageEngine::open_in_memory().unwrap());
        let engine = ProvenanceEngine::with_store(store.clone(), CapsuleConfig::default());
        for i in 0..NODES {
            let id = format!("n{i}");
            store.create_capsule(&test_fixtures::capsule(&id)).unwrap();
            engine.register(&RegisterRequest::new(id)).unwrap();
        }
        for (from, to) in &edges {
            engine
                .add_relation(&RelationRequest::new(format!("n{from}"), format!("n{to}"), "child"))
                .unwrap();
        }

        let bounds = TraversalBounds { max_depth, max_nodes };
        let graph = traverse(store.as_ref(), "n0", bounds).unwrap();

        prop_assert!(!graph.nodes.is_empty());
        prop_assert!(graph.nodes.len() <= max_nodes);
        let unique: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        prop_assert_eq!(unique.len(), graph.nodes.len());
        prop_assert!(graph.nodes.iter().all(|n| n.depth <= max_depth));
        for edge in &graph.edges {
            prop_assert!(unique.contains(edge.source.as_str()));
            prop_assert!(unique.contains(edge.target.as_str()));
        }
    }
}
