//! Registration and ledger appends against an in-memory store.

use capsule_core::errors::{CapsuleError, ErrorClass};
use capsule_core::models::*;
use capsule_core::traits::{ICapsuleStore, IProvenanceStorage};
use capsule_storage::StorageEngine;

fn registration(id: &str) -> NewRegistration {
    NewRegistration {
        capsule_id: id.to_string(),
        source: SourceDescriptor {
            source_type: "manual".to_string(),
            source_id: Some(format!("src-{id}")),
            data: serde_json::json!({ "origin": "test" }),
        },
        initial_version: "v1.0.0".to_string(),
        initial_changes: "Initial version".to_string(),
        initial_reason: "initial creation".to_string(),
        author: "system".to_string(),
        fingerprint: "fp-initial".to_string(),
    }
}

fn version(id: &str, label: &str) -> NewVersion {
    NewVersion {
        capsule_id: id.to_string(),
        version: label.to_string(),
        changes: format!("changes for {label}"),
        reason: "refinement".to_string(),
        author: "editor".to_string(),
        ..Default::default()
    }
}

fn registered(ids: &[&str]) -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    for id in ids {
        engine.register(&registration(id)).unwrap();
    }
    engine
}

// --- Registration ---

#[test]
fn register_creates_initial_version_and_empty_ledgers() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let created = engine.register(&registration("c-1")).unwrap();
    assert_eq!(created.versions.version_count, 1);

    let aggregate = engine.get_aggregate("c-1").unwrap().unwrap();
    assert_eq!(aggregate.versions.version_count, 1);
    assert_eq!(aggregate.versions.versions.len(), 1);
    assert_eq!(aggregate.versions.current_version.as_deref(), Some("v1.0.0"));
    assert_eq!(aggregate.versions.versions[0].reason, "initial creation");
    assert_eq!(aggregate.versions.versions[0].fingerprint, "fp-initial");
    assert!(aggregate.evolution.relations.is_empty());
    assert!(aggregate.evolution.parent_id.is_none());
    assert!(aggregate.validations.validations.is_empty());
    assert_eq!(aggregate.citations.count, 0);
    assert_eq!(aggregate.source.source_type, "manual");
    assert_eq!(aggregate.source.data["origin"], "test");
}

#[test]
fn duplicate_registration_fails_and_leaves_state_unchanged() {
    let engine = registered(&["c-1"]);
    engine.add_version(&version("c-1", "v1.1.0")).unwrap();
    let before = engine.get_aggregate("c-1").unwrap().unwrap();

    let err = engine.register(&registration("c-1")).unwrap_err();
    assert!(matches!(err, CapsuleError::AlreadyRegistered { .. }));
    assert_eq!(err.class(), ErrorClass::AlreadyExists);

    let after = engine.get_aggregate("c-1").unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn unregistered_reads_return_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get_aggregate("ghost").unwrap().is_none());
    assert!(engine.get_header("ghost").unwrap().is_none());
    assert!(engine.version_history("ghost").unwrap().is_none());
    assert!(engine.evolution("ghost").unwrap().is_none());
    assert!(engine.validations("ghost").unwrap().is_none());
    assert!(engine.citations("ghost").unwrap().is_none());
    assert!(engine.audit_counters("ghost").unwrap().is_none());
    assert!(engine.outgoing_relations("ghost").unwrap().is_empty());
}

#[test]
fn empty_initial_label_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut input = registration("c-1");
    input.initial_version = String::new();
    let err = engine.register(&input).unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvalidInput);
    assert!(engine.get_header("c-1").unwrap().is_none());
}

// --- Versions ---

#[test]
fn history_is_append_ordered_with_current_pointer() {
    let engine = registered(&["c-1"]);
    for label in ["v1.1.0", "v1.2.0", "v2.0.0"] {
        engine.add_version(&version("c-1", label)).unwrap();
    }

    let history = engine.version_history("c-1").unwrap().unwrap();
    let labels: Vec<_> = history.versions.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(labels, ["v1.0.0", "v1.1.0", "v1.2.0", "v2.0.0"]);
    assert_eq!(history.version_count, 4);
    assert_eq!(history.current_version.as_deref(), Some("v2.0.0"));
}

#[test]
fn labels_may_be_reused_out_of_order() {
    let engine = registered(&["c-1"]);
    engine.add_version(&version("c-1", "v3.0.0")).unwrap();
    engine.add_version(&version("c-1", "v1.0.0")).unwrap();

    let history = engine.version_history("c-1").unwrap().unwrap();
    assert_eq!(history.version_count, 3);
    assert_eq!(history.current_version.as_deref(), Some("v1.0.0"));
    assert_eq!(
        history.get_version("v1.0.0").map(|v| v.author.as_str()),
        Some("editor")
    );
}

#[test]
fn version_for_unregistered_capsule_fails() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine.add_version(&version("ghost", "v2")).unwrap_err();
    assert!(matches!(err, CapsuleError::NotRegistered { .. }));
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[test]
fn version_score_snapshot_is_stored() {
    let engine = registered(&["c-1"]);
    let mut input = version("c-1", "v1.1.0");
    input.datm_score.insert("truth".into(), 82.5);
    input.datm_score.insert("beauty".into(), 70.0);
    engine.add_version(&input).unwrap();

    let history = engine.version_history("c-1").unwrap().unwrap();
    let latest = history.latest().unwrap();
    assert_eq!(latest.datm_score.get("truth"), Some(&82.5));
    assert_eq!(latest.datm_score.len(), 2);
}

// --- Relations ---

#[test]
fn child_relations_dedupe_in_view_but_not_in_ledger() {
    let engine = registered(&["a"]);
    engine
        .add_relation(&NewRelation::new("a", "b", RelationKind::Child))
        .unwrap();
    engine
        .add_relation(&NewRelation::new("a", "b", RelationKind::Child))
        .unwrap();

    let evolution = engine.evolution("a").unwrap().unwrap();
    assert_eq!(evolution.child_ids, vec!["b".to_string()]);
    assert_eq!(evolution.relations.len(), 2);
    assert_eq!(engine.outgoing_relations("a").unwrap().len(), 2);
}

#[test]
fn relation_target_need_not_be_registered() {
    let engine = registered(&["a"]);
    let rel = engine
        .add_relation(
            &NewRelation::new("a", "elsewhere", RelationKind::InspiredBy)
                .with_strength(0.3)
                .with_metadata(serde_json::json!({ "note": "loose" })),
        )
        .unwrap();
    assert_eq!(rel.strength, 0.3);

    let stored = engine.outgoing_relations("a").unwrap();
    assert_eq!(stored[0].relation_type, RelationKind::InspiredBy);
    assert_eq!(stored[0].metadata["note"], "loose");
}

#[test]
fn relation_from_unregistered_source_fails() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine
        .add_relation(&NewRelation::new("ghost", "b", RelationKind::Parent))
        .unwrap_err();
    assert!(matches!(err, CapsuleError::NotRegistered { .. }));
}

#[test]
fn relation_strength_out_of_range_is_rejected() {
    let engine = registered(&["a"]);
    let err = engine
        .add_relation(&NewRelation::new("a", "b", RelationKind::Supports).with_strength(1.5))
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvalidInput);
    assert!(engine.outgoing_relations("a").unwrap().is_empty());
}

// --- Validations ---

#[test]
fn verified_and_disputed_counters_track_ledger() {
    let engine = registered(&["c-1"]);
    let statuses = [
        ValidationStatus::Verified,
        ValidationStatus::Pending,
        ValidationStatus::Disputed,
        ValidationStatus::Verified,
        ValidationStatus::Expired,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        let mut input = NewValidation::new("c-1", format!("validator-{i}"), status);
        input.score = Some(80.0);
        engine.add_validation(&input).unwrap();
    }

    let header = engine.get_header("c-1").unwrap().unwrap();
    assert_eq!(header.verified_count, 2);
    assert_eq!(header.disputed_count, 1);

    let record = engine.validations("c-1").unwrap().unwrap();
    assert_eq!(record.validations.len(), 5);
    assert_eq!(record.verified_count(), 2);
    assert!(record.is_verified());
    assert_eq!(record.validations[1].status, ValidationStatus::Pending);
}

#[test]
fn validation_without_score_roundtrips_as_none() {
    let engine = registered(&["c-1"]);
    engine
        .add_validation(&NewValidation::new("c-1", "peer", ValidationStatus::Pending))
        .unwrap();
    let record = engine.validations("c-1").unwrap().unwrap();
    assert_eq!(record.validations[0].score, None);
}

// --- Citations ---

#[test]
fn citations_count_against_target() {
    let engine = registered(&["target"]);
    for source in ["s1", "s2", "s1"] {
        engine.add_citation(&NewCitation::new(source, "target")).unwrap();
    }
    let receipt = engine
        .add_citation(&NewCitation::new("target", "target"))
        .unwrap();
    assert_eq!(receipt.target_citations, 4);

    let citations = engine.citations("target").unwrap().unwrap();
    assert_eq!(citations.count, 4);
    assert_eq!(citations.citing_capsules(), ["s1", "s2", "s1", "target"]);
}

#[test]
fn citation_to_unregistered_target_fails() {
    let engine = registered(&["source"]);
    let err = engine
        .add_citation(&NewCitation::new("source", "ghost"))
        .unwrap_err();
    assert!(matches!(err, CapsuleError::NotRegistered { .. }));
}

// --- Projections ---

#[test]
fn summary_is_newest_first_and_respects_limit() {
    let engine = registered(&["first", "second", "third"]);
    engine.add_citation(&NewCitation::new("x", "second")).unwrap();

    let summary = engine.summary(2).unwrap();
    let ids: Vec<_> = summary.iter().map(|s| s.capsule_id.as_str()).collect();
    assert_eq!(ids, ["third", "second"]);
    assert_eq!(summary[1].citation_count, 1);
    assert_eq!(summary[0].version_count, 1);
    assert_eq!(summary[0].source_type, "manual");
    assert!(engine.summary(0).unwrap().is_empty());
}

#[test]
fn audit_reports_consistent_counters() {
    let engine = registered(&["c-1"]);
    engine.add_version(&version("c-1", "v2")).unwrap();
    engine
        .add_validation(&NewValidation::new("c-1", "v", ValidationStatus::Disputed))
        .unwrap();
    engine.add_citation(&NewCitation::new("x", "c-1")).unwrap();

    let audit = engine.audit_counters("c-1").unwrap().unwrap();
    assert!(audit.is_consistent(), "{audit:?}");
    assert_eq!(audit.versions.derived, 2);
    assert_eq!(audit.disputed.stored, 1);
}

#[test]
fn appends_bump_updated_at() {
    let engine = registered(&["c-1"]);
    let before = engine.get_header("c-1").unwrap().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    engine
        .add_relation(&NewRelation::new("c-1", "c-2", RelationKind::Branch))
        .unwrap();
    let after = engine.get_header("c-1").unwrap().unwrap();
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.created_at, before.created_at);
}

// --- Capsule collaborator ---

#[test]
fn capsule_store_create_get_update() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let capsule = test_fixtures::capsule("cap-1");
    engine.create_capsule(&capsule).unwrap();

    let err = engine.create_capsule(&capsule).unwrap_err();
    assert!(matches!(err, CapsuleError::CapsuleExists { .. }));

    let update = CapsuleUpdate {
        citations: Some(3),
        version: Some("v1.1.0".to_string()),
        ..Default::default()
    };
    engine.update("cap-1", &update).unwrap();

    let stored = engine.get("cap-1").unwrap().unwrap();
    assert_eq!(stored.citations, 3);
    assert_eq!(stored.version, "v1.1.0");
    assert_eq!(stored.title, capsule.title);
    assert!(engine.exists("cap-1").unwrap());
    assert!(!engine.exists("cap-2").unwrap());
}

#[test]
fn ledger_mirror_update_resolves_counts_from_provenance() {
    let engine = registered(&["cap-1"]);
    engine.create_capsule(&test_fixtures::capsule("cap-1")).unwrap();
    for source in ["a", "b", "c"] {
        engine
            .add_citation(&NewCitation::new(source, "cap-1"))
            .unwrap();
    }

    // A write-back carrying an older count.
    engine
        .update("cap-1", &CapsuleUpdate::ledger_citations(1))
        .unwrap();
    assert_eq!(engine.get("cap-1").unwrap().unwrap().citations, 3);

    // Without a provenance row the carried value applies.
    engine.create_capsule(&test_fixtures::capsule("cap-2")).unwrap();
    engine
        .update("cap-2", &CapsuleUpdate::ledger_validations(4))
        .unwrap();
    assert_eq!(engine.get("cap-2").unwrap().unwrap().validations, 4);
}

#[test]
fn capsule_update_on_missing_id_fails() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine
        .update("missing", &CapsuleUpdate::default())
        .unwrap_err();
    assert!(matches!(err, CapsuleError::CapsuleNotFound { .. }));
}

#[test]
fn list_capsules_pages_newest_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for id in ["a", "b", "c"] {
        engine.create_capsule(&test_fixtures::capsule(id)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    let first = engine.list_capsules(2, 0).unwrap();
    let ids: Vec<_> = first.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c", "b"]);
    let rest = engine.list_capsules(2, 2).unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(engine.count_capsules().unwrap(), 3);
}
