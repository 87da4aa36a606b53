//! Evolution relations: directed, typed, weighted edges between capsules.
//!
//! Relations are event facts. Nothing mirrors `child` into `parent` on the
//! other side, and duplicates are kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CapsuleError, CapsuleResult};

/// The closed set of relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Parent,
    Child,
    Branch,
    Merge,
    InspiredBy,
    Supports,
    Contradicts,
}

impl RelationKind {
    pub const ALL: [RelationKind; 7] = [
        Self::Parent,
        Self::Child,
        Self::Branch,
        Self::Merge,
        Self::InspiredBy,
        Self::Supports,
        Self::Contradicts,
    ];

    /// Parse from string (matching the serde rename).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            "branch" => Some(Self::Branch),
            "merge" => Some(Self::Merge),
            "inspired_by" => Some(Self::InspiredBy),
            "supports" => Some(Self::Supports),
            "contradicts" => Some(Self::Contradicts),
            _ => None,
        }
    }

    /// Parse, failing with `InvalidRelationKind` on anything outside the set.
    pub fn parse(s: &str) -> CapsuleResult<Self> {
        Self::from_str_name(s).ok_or_else(|| CapsuleError::InvalidRelationKind {
            kind: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Branch => "branch",
            Self::Merge => "merge",
            Self::InspiredBy => "inspired_by",
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable relation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRelation {
    pub capsule_id: String,
    pub related_capsule_id: String,
    pub relation_type: RelationKind,
    pub strength: f64,
    pub timestamp: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

/// Input for appending a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRelation {
    pub capsule_id: String,
    pub related_capsule_id: String,
    pub relation_type: RelationKind,
    pub strength: f64,
    pub metadata: serde_json::Value,
}

impl NewRelation {
    pub fn new(
        capsule_id: impl Into<String>,
        related_capsule_id: impl Into<String>,
        relation_type: RelationKind,
    ) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            related_capsule_id: related_capsule_id.into(),
            relation_type,
            strength: 1.0,
            metadata: serde_json::Value::Object(Default::default()),
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn validate(&self) -> CapsuleResult<()> {
        if self.related_capsule_id.trim().is_empty() {
            return Err(CapsuleError::InvalidInput {
                field: "related_capsule_id",
                reason: "must not be empty".to_string(),
            });
        }
        CapsuleError::check_range("strength", self.strength, 0.0, 1.0)
    }
}

/// Read-time fold of a capsule's outgoing relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub capsule_id: String,
    /// Target of the most recent `parent` relation.
    pub parent_id: Option<String>,
    /// `child` targets, de-duplicated, first-seen order.
    pub child_ids: Vec<String>,
    /// `branch` targets, de-duplicated, first-seen order.
    pub branches: Vec<String>,
    /// Every relation event, duplicates included.
    pub relations: Vec<EvolutionRelation>,
}

impl Evolution {
    pub fn new(capsule_id: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            parent_id: None,
            child_ids: Vec::new(),
            branches: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Rebuild the view by replaying relation events in append order.
    pub fn replay(
        capsule_id: impl Into<String>,
        relations: impl IntoIterator<Item = EvolutionRelation>,
    ) -> Self {
        let mut evolution = Self::new(capsule_id);
        for relation in relations {
            evolution.apply(relation);
        }
        evolution
    }

    pub fn apply(&mut self, relation: EvolutionRelation) {
        let target = &relation.related_capsule_id;
        match relation.relation_type {
            RelationKind::Parent => self.parent_id = Some(target.clone()),
            RelationKind::Child => push_unique(&mut self.child_ids, target),
            RelationKind::Branch => push_unique(&mut self.branches, target),
            _ => {}
        }
        self.relations.push(relation);
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(target: &str, kind: RelationKind) -> EvolutionRelation {
        EvolutionRelation {
            capsule_id: "a".into(),
            related_capsule_id: target.into(),
            relation_type: kind,
            strength: 1.0,
            timestamp: Utc::now(),
            metadata: serde_json::json!({}),
        }
    }

    #[test]
    fn kinds_roundtrip_through_names() {
        for kind in RelationKind::ALL {
            assert_eq!(RelationKind::from_str_name(kind.as_str()), Some(kind));
        }
        assert!(RelationKind::parse("sibling").is_err());
    }

    #[test]
    fn replay_dedupes_children_but_keeps_events() {
        let evo = Evolution::replay(
            "a",
            vec![rel("b", RelationKind::Child), rel("b", RelationKind::Child)],
        );
        assert_eq!(evo.child_ids, vec!["b".to_string()]);
        assert_eq!(evo.relations.len(), 2);
    }

    #[test]
    fn parent_is_last_write_wins() {
        let evo = Evolution::replay(
            "a",
            vec![rel("p1", RelationKind::Parent), rel("p2", RelationKind::Parent)],
        );
        assert_eq!(evo.parent_id.as_deref(), Some("p2"));
    }

    #[test]
    fn other_kinds_only_land_in_event_list() {
        let evo = Evolution::replay(
            "a",
            vec![
                rel("x", RelationKind::Supports),
                rel("y", RelationKind::Branch),
                rel("y", RelationKind::Branch),
            ],
        );
        assert!(evo.child_ids.is_empty());
        assert_eq!(evo.branches, vec!["y".to_string()]);
        assert_eq!(evo.relations.len(), 3);
    }

    #[test]
    fn strength_outside_unit_interval_is_rejected() {
        let input = NewRelation::new("a", "b", RelationKind::Merge).with_strength(1.5);
        assert!(input.validate().is_err());
    }
}
