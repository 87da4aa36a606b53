//! Evolution graph traversal: bounds, cycles, ordering, unregistered nodes.

use std::sync::Arc;

use capsule_core::config::CapsuleConfig;
use capsule_core::models::RelationKind;
use capsule_provenance::{ProvenanceEngine, RegisterRequest, RelationRequest};
use capsule_storage::StorageEngine;

fn engine_with(config: CapsuleConfig) -> (Arc<StorageEngine>, ProvenanceEngine) {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let engine = ProvenanceEngine::with_store(store.clone(), config);
    (store, engine)
}

fn register(store: &StorageEngine, engine: &ProvenanceEngine, id: &str) {
    store.create_capsule(&test_fixtures::capsule(id)).unwrap();
    engine.register(&RegisterRequest::new(id)).unwrap();
}

fn relate(engine: &ProvenanceEngine, from: &str, to: &str, kind: &str, strength: f64) {
    let mut request = RelationRequest::new(from, to, kind);
    request.strength = Some(strength);
    engine.add_relation(&request).unwrap();
}

fn lineage(config: CapsuleConfig) -> ProvenanceEngine {
    let scenario = test_fixtures::load_graph("lineage");
    let (store, engine) = engine_with(config);
    for id in &scenario.capsules {
        register(&store, &engine, id);
    }
    for rel in &scenario.relations {
        relate(&engine, &rel.from, &rel.to, &rel.kind, rel.strength);
    }
    engine
}

fn ids(graph: &capsule_core::models::EvolutionGraph) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn lineage_with_cycle_visits_each_node_once() {
    let engine = lineage(CapsuleConfig::default());
    let graph = engine.traverse("root", Some(5)).unwrap();

    assert_eq!(
        ids(&graph),
        ["root", "child-a", "child-b", "branch-x", "grandchild"]
    );
    assert_eq!(graph.edges.len(), 5);
    assert!(!graph.truncated);

    let back_edge = graph.edges.last().unwrap();
    assert_eq!(back_edge.source, "grandchild");
    assert_eq!(back_edge.target, "root");
    assert_eq!(back_edge.relation_type, RelationKind::InspiredBy);
    assert_eq!(graph.node("grandchild").unwrap().depth, 2);
}

#[test]
fn two_node_cycle_terminates() {
    let (store, engine) = engine_with(CapsuleConfig::default());
    register(&store, &engine, "a");
    register(&store, &engine, "b");
    relate(&engine, "a", "b", "child", 1.0);
    relate(&engine, "b", "a", "parent", 1.0);

    let graph = engine.traverse("a", Some(5)).unwrap();
    assert_eq!(ids(&graph), ["a", "b"]);
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn depth_bound_limits_expansion() {
    let engine = lineage(CapsuleConfig::default());

    let zero = engine.traverse("root", Some(0)).unwrap();
    assert_eq!(ids(&zero), ["root"]);
    assert!(zero.edges.is_empty());

    let one = engine.traverse("root", Some(1)).unwrap();
    assert_eq!(ids(&one), ["root", "child-a", "child-b", "branch-x"]);
    assert_eq!(one.edges.len(), 3);
    assert!(one.nodes.iter().all(|n| n.depth <= 1));
}

#[test]
fn requested_depth_is_clamped_and_defaulted() {
    let mut config = CapsuleConfig::default();
    config.traversal.default_depth = 1;
    config.traversal.max_depth = 2;
    let engine = lineage(config);

    assert_eq!(engine.traverse("root", None).unwrap().depth, 1);
    assert_eq!(engine.traverse("root", Some(50)).unwrap().depth, 2);
}

#[test]
fn node_budget_truncates_and_drops_edges_to_unadmitted_nodes() {
    let mut config = CapsuleConfig::default();
    config.traversal.max_nodes = 3;
    let engine = lineage(config);

    let graph = engine.traverse("root", Some(5)).unwrap();
    assert_eq!(ids(&graph), ["root", "child-a", "child-b"]);
    assert!(graph.truncated);
    for edge in &graph.edges {
        assert!(graph.node(&edge.source).is_some());
        assert!(graph.node(&edge.target).is_some());
    }
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn unregistered_root_gives_empty_graph() {
    let (_store, engine) = engine_with(CapsuleConfig::default());
    let graph = engine.traverse("nowhere", Some(3)).unwrap();
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn unregistered_targets_are_leaves() {
    let (store, engine) = engine_with(CapsuleConfig::default());
    register(&store, &engine, "a");
    relate(&engine, "a", "external", "inspired_by", 0.6);

    let graph = engine.traverse("a", Some(3)).unwrap();
    let leaf = graph.node("external").unwrap();
    assert!(!leaf.registered);
    assert_eq!(leaf.node_type, "unknown");
    assert_eq!(leaf.current_version, None);

    let root = graph.node("a").unwrap();
    assert!(root.registered);
    assert_eq!(root.current_version.as_deref(), Some("v1.0.0"));
}

#[test]
fn siblings_follow_insertion_order_and_duplicates_stay() {
    let (store, engine) = engine_with(CapsuleConfig::default());
    for id in ["r", "z", "m", "a"] {
        register(&store, &engine, id);
    }
    relate(&engine, "r", "z", "supports", 0.1);
    relate(&engine, "r", "m", "supports", 0.9);
    relate(&engine, "r", "a", "supports", 0.5);
    relate(&engine, "r", "z", "contradicts", 0.3);

    let graph = engine.traverse("r", Some(1)).unwrap();
    assert_eq!(ids(&graph), ["r", "z", "m", "a"]);
    assert_eq!(graph.edges.len(), 4);
    assert_eq!(graph.edges[3].relation_type, RelationKind::Contradicts);
}
