mod aggregate;
mod capsule;
mod citation;
mod datm;
mod evolution;
mod graph;
mod validation;
mod version;

pub use aggregate::{
    CounterAudit, CounterCheck, NewRegistration, ProvenanceAggregate, ProvenanceHeader,
    ProvenanceLookup, ProvenanceSummary, SourceDescriptor,
};
pub use capsule::{CapsuleSnapshot, CapsuleUpdate};
pub use citation::{Citation, CitationReceipt, Citations, NewCitation};
pub use datm::{AxisBreakdown, DatmAxis, DatmScore, Grade, ScoreBreakdown};
pub use evolution::{Evolution, EvolutionRelation, NewRelation, RelationKind};
pub use graph::{EvolutionGraph, GraphEdge, GraphNode, OverviewGraph, OverviewNode};
pub use validation::{NewValidation, Validation, ValidationRecord, ValidationStatus};
pub use version::{CapsuleVersion, NewVersion, VersionHistory};
