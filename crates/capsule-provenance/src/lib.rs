//! # capsule-provenance
//!
//! Orchestrates the provenance system over a durable store: registration
//! against the capsule collaborator, the four ledgers, count mirroring back
//! onto capsules, DATM evaluation, and bounded evolution graph traversal.

pub mod engine;
pub mod graph;
pub mod requests;

pub use engine::ProvenanceEngine;
pub use requests::{
    BatchOutcome, BatchStatus, RegisterRequest, RelationRequest, RevisionRequest,
    ValidationRequest,
};
