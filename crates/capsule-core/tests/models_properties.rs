//! Property tests: content fingerprints and the evolution fold.

use std::collections::HashSet;

use chrono::Utc;
use proptest::prelude::*;

use capsule_core::fingerprint::content_fingerprint;
use capsule_core::models::*;

fn arb_snapshot() -> impl Strategy<Value = CapsuleSnapshot> {
    (
        "[a-zA-Z ]{0,60}",
        "[a-z ]{0,200}",
        prop::collection::vec("[a-z]{1,8}", 0..5),
        prop::collection::vec("[a-z ]{1,20}", 0..6),
    )
        .prop_map(|(title, insight, topics, evidence)| {
            let mut c = CapsuleSnapshot::new("prop", title, "domain", insight);
            c.topics = topics;
            c.evidence = evidence;
            c
        })
}

fn arb_relation() -> impl Strategy<Value = EvolutionRelation> {
    ("[a-d]", prop::sample::select(RelationKind::ALL.to_vec())).prop_map(|(target, kind)| {
        EvolutionRelation {
            capsule_id: "root".into(),
            related_capsule_id: target,
            relation_type: kind,
            strength: 1.0,
            timestamp: Utc::now(),
            metadata: serde_json::json!({}),
        }
    })
}

proptest! {
    #[test]
    fn fingerprint_ignores_counters_version_and_timestamps(
        capsule in arb_snapshot(),
        citations in 0u64..1000,
        validations in 0u64..1000,
        version in "v[0-9]\\.[0-9]\\.[0-9]",
    ) {
        let mut touched = capsule.clone();
        touched.citations = citations;
        touched.validations = validations;
        touched.version = version;
        touched.updated_at = Utc::now();
        prop_assert_eq!(content_fingerprint(&capsule), content_fingerprint(&touched));
    }

    #[test]
    fn replay_keeps_every_event_and_unique_child_ids(
        relations in prop::collection::vec(arb_relation(), 0..40),
    ) {
        let evolution = Evolution::replay("root", relations.clone());
        prop_assert_eq!(evolution.relations.len(), relations.len());

        let unique: HashSet<_> = evolution.child_ids.iter().collect();
        prop_assert_eq!(unique.len(), evolution.child_ids.len());
        let expected: HashSet<_> = relations
            .iter()
            .filter(|r| r.relation_type == RelationKind::Child)
            .map(|r| &r.related_capsule_id)
            .collect();
        prop_assert_eq!(unique, expected);

        let last_parent = relations
            .iter()
            .rev()
            .find(|r| r.relation_type == RelationKind::Parent)
            .map(|r| r.related_capsule_id.clone());
        prop_assert_eq!(evolution.parent_id, last_parent);
    }
}
