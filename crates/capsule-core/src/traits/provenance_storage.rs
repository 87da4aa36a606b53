use crate::errors::CapsuleResult;
use crate::models::{
    CapsuleVersion, CitationReceipt, Citations, CounterAudit, Evolution, EvolutionRelation,
    NewCitation, NewRegistration, NewRelation, NewValidation, NewVersion, ProvenanceAggregate,
    ProvenanceHeader, ProvenanceSummary, Validation, ValidationRecord, VersionHistory,
};

/// Durable provenance store: registration, the four ledgers, and the
/// cross-capsule projections.
///
/// Every append runs as one atomic unit together with its counter update.
/// Reads return `Ok(None)` for capsules that were never registered.
pub trait IProvenanceStorage: Send + Sync {
    // --- Aggregate ---
    fn register(&self, registration: &NewRegistration) -> CapsuleResult<ProvenanceAggregate>;
    fn get_header(&self, capsule_id: &str) -> CapsuleResult<Option<ProvenanceHeader>>;
    fn get_aggregate(&self, capsule_id: &str) -> CapsuleResult<Option<ProvenanceAggregate>>;
    fn summary(&self, limit: usize) -> CapsuleResult<Vec<ProvenanceSummary>>;
    fn audit_counters(&self, capsule_id: &str) -> CapsuleResult<Option<CounterAudit>>;

    // --- Versions ---
    fn add_version(&self, version: &NewVersion) -> CapsuleResult<CapsuleVersion>;
    fn version_history(&self, capsule_id: &str) -> CapsuleResult<Option<VersionHistory>>;

    // --- Relations ---
    fn add_relation(&self, relation: &NewRelation) -> CapsuleResult<EvolutionRelation>;
    /// Outgoing relation events in append order. Empty for unregistered ids.
    fn outgoing_relations(&self, capsule_id: &str) -> CapsuleResult<Vec<EvolutionRelation>>;
    fn evolution(&self, capsule_id: &str) -> CapsuleResult<Option<Evolution>>;

    // --- Validations ---
    fn add_validation(&self, validation: &NewValidation) -> CapsuleResult<Validation>;
    fn validations(&self, capsule_id: &str) -> CapsuleResult<Option<ValidationRecord>>;

    // --- Citations ---
    fn add_citation(&self, citation: &NewCitation) -> CapsuleResult<CitationReceipt>;
    fn citations(&self, capsule_id: &str) -> CapsuleResult<Option<Citations>>;
}
