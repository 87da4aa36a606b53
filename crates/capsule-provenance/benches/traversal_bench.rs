use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use capsule_core::config::CapsuleConfig;
use capsule_provenance::{ProvenanceEngine, RegisterRequest, RelationRequest};
use capsule_storage::StorageEngine;

/// A layered graph: every node links to the next `fanout` nodes.
fn layered(nodes: usize, fanout: usize) -> ProvenanceEngine {
    let store = Arc::new(StorageEngine::open_in_memory().expect("open store"));
    let engine = ProvenanceEngine::with_store(store.clone(), CapsuleConfig::default());
    for i in 0..nodes {
        let id = format!("n{i}");
        store
            .create_capsule(&test_fixtures::capsule(&id))
            .expect("create capsule");
        engine
            .register(&RegisterRequest::new(id))
            .expect("register");
    }
    for i in 0..nodes {
        for step in 1..=fanout {
            let target = (i + step) % nodes;
            engine
                .add_relation(&RelationRequest::new(format!("n{i}"), format!("n{target}"), "child"))
                .expect("relate");
        }
    }
    engine
}

fn bench_traversal(c: &mut Criterion) {
    let engine = layered(200, 4);

    c.bench_function("traverse_depth_3", |b| {
        b.iter(|| engine.traverse("n0", Some(3)).expect("traverse"))
    });
    c.bench_function("traverse_depth_5_budgeted", |b| {
        b.iter(|| engine.traverse("n0", Some(5)).expect("traverse"))
    });
    c.bench_function("graph_overview_50", |b| {
        b.iter(|| engine.graph_overview(Some(50)).expect("overview"))
    });
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);
