//! ProvenanceEngine: the operations exposed to the request layer.

use std::path::Path;
use std::sync::Arc;

use capsule_core::config::CapsuleConfig;
use capsule_core::errors::{CapsuleError, CapsuleResult};
use capsule_core::fingerprint::content_fingerprint;
use capsule_core::models::{
    CapsuleSnapshot, CapsuleUpdate, CapsuleVersion, CitationReceipt, Citations, CounterAudit,
    DatmScore, Evolution, EvolutionGraph, EvolutionRelation, NewCitation, NewRegistration,
    NewRelation, NewValidation, NewVersion, OverviewGraph, ProvenanceAggregate, ProvenanceLookup,
    ProvenanceSummary, RelationKind, ScoreBreakdown, SourceDescriptor, Validation,
    ValidationRecord, ValidationStatus, VersionHistory,
};
use capsule_core::traits::{ICapsuleStore, IEvaluator, IProvenanceStorage};
use capsule_datm::DatmEvaluator;
use capsule_observability::tracing_setup::events;
use capsule_observability::{evaluation_span, ledger_span, register_span, traversal_span};
use capsule_storage::StorageEngine;

use crate::graph::{self, TraversalBounds};
use crate::requests::{
    BatchOutcome, BatchStatus, RegisterRequest, RelationRequest, RevisionRequest,
    ValidationRequest,
};

/// Entry point for every provenance operation.
///
/// Ledger writes go through `IProvenanceStorage`; visible counters and
/// scores are mirrored onto the capsule through `ICapsuleStore` after the
/// ledger write has committed.
pub struct ProvenanceEngine {
    storage: Arc<dyn IProvenanceStorage>,
    capsules: Arc<dyn ICapsuleStore>,
    evaluator: Arc<dyn IEvaluator>,
    config: CapsuleConfig,
}

impl ProvenanceEngine {
    pub fn new(
        storage: Arc<dyn IProvenanceStorage>,
        capsules: Arc<dyn ICapsuleStore>,
        evaluator: Arc<dyn IEvaluator>,
        config: CapsuleConfig,
    ) -> Self {
        Self {
            storage,
            capsules,
            evaluator,
            config,
        }
    }

    /// One SQLite store serving as both the provenance store and the capsule collaborator.
    pub fn with_store(store: Arc<StorageEngine>, config: CapsuleConfig) -> Self {
        Self::new(
            store.clone(),
            store,
            Arc::new(DatmEvaluator::new()),
            config,
        )
    }

    /// Open the file-backed store named by `config.storage.db_path`.
    pub fn open(config: CapsuleConfig) -> CapsuleResult<Self> {
        let store = StorageEngine::open_with_config(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?;
        Ok(Self::with_store(Arc::new(store), config))
    }

    pub fn open_in_memory() -> CapsuleResult<Self> {
        let store = StorageEngine::open_in_memory()?;
        Ok(Self::with_store(Arc::new(store), CapsuleConfig::default()))
    }

    pub fn config(&self) -> &CapsuleConfig {
        &self.config
    }

    fn require_capsule(&self, capsule_id: &str) -> CapsuleResult<CapsuleSnapshot> {
        self.capsules
            .get(capsule_id)?
            .ok_or_else(|| CapsuleError::CapsuleNotFound {
                id: capsule_id.to_string(),
            })
    }

    fn not_registered(capsule_id: &str) -> CapsuleError {
        CapsuleError::NotRegistered {
            id: capsule_id.to_string(),
        }
    }

    // --- DATM ---

    pub fn evaluate(&self, capsule: &CapsuleSnapshot) -> DatmScore {
        let _span = evaluation_span!(capsule.id).entered();
        self.evaluator.evaluate(capsule)
    }

    pub fn score_breakdown(&self, capsule: &CapsuleSnapshot) -> ScoreBreakdown {
        let _span = evaluation_span!(capsule.id).entered();
        self.evaluator.score_breakdown(capsule)
    }

    /// Evaluate a stored capsule.
    pub fn evaluate_capsule(&self, capsule_id: &str) -> CapsuleResult<ScoreBreakdown> {
        let capsule = self.require_capsule(capsule_id)?;
        Ok(self.score_breakdown(&capsule))
    }

    // --- Aggregate ---

    /// Register a capsule known to the collaborator. Write-once.
    pub fn register(&self, request: &RegisterRequest) -> CapsuleResult<ProvenanceAggregate> {
        let _span = register_span!(request.capsule_id).entered();
        let capsule = self.require_capsule(&request.capsule_id)?;
        let defaults = &self.config.registration;

        let registration = NewRegistration {
            capsule_id: request.capsule_id.clone(),
            source: SourceDescriptor {
                source_type: request
                    .source_type
                    .clone()
                    .unwrap_or_else(|| defaults.source_type.clone()),
                source_id: request.source_id.clone(),
                data: request.source_data.clone(),
            },
            initial_version: request
                .initial_version
                .clone()
                .unwrap_or_else(|| defaults.initial_version.clone()),
            initial_changes: defaults.initial_changes.clone(),
            initial_reason: defaults.initial_reason.clone(),
            author: request
                .author
                .clone()
                .unwrap_or_else(|| defaults.author.clone()),
            fingerprint: content_fingerprint(&capsule),
        };

        let aggregate = self.storage.register(&registration)?;
        events::capsule_registered(
            &registration.capsule_id,
            &registration.source.source_type,
            &registration.initial_version,
        );
        Ok(aggregate)
    }

    /// Register each id with the configured defaults. Duplicate and unknown
    /// ids are reported per id; any other failure aborts the batch.
    pub fn register_batch(&self, capsule_ids: &[String]) -> CapsuleResult<Vec<BatchOutcome>> {
        let mut outcomes = Vec::with_capacity(capsule_ids.len());
        for capsule_id in capsule_ids {
            let status = match self.register(&RegisterRequest::new(capsule_id.clone())) {
                Ok(_) => BatchStatus::Registered,
                Err(CapsuleError::AlreadyRegistered { .. }) => BatchStatus::AlreadyRegistered,
                Err(CapsuleError::CapsuleNotFound { .. }) => BatchStatus::CapsuleNotFound,
                Err(e) => return Err(e),
            };
            outcomes.push(BatchOutcome {
                capsule_id: capsule_id.clone(),
                status,
            });
        }
        Ok(outcomes)
    }

    /// Distinguishes "registered", "capsule exists but never registered",
    /// and "no such capsule" (`CapsuleNotFound`).
    pub fn lookup(&self, capsule_id: &str) -> CapsuleResult<ProvenanceLookup> {
        if let Some(aggregate) = self.storage.get_aggregate(capsule_id)? {
            return Ok(ProvenanceLookup::Registered(Box::new(aggregate)));
        }
        if self.capsules.exists(capsule_id)? {
            Ok(ProvenanceLookup::NotRegistered {
                capsule_id: capsule_id.to_string(),
            })
        } else {
            Err(CapsuleError::CapsuleNotFound {
                id: capsule_id.to_string(),
            })
        }
    }

    pub fn get_aggregate(&self, capsule_id: &str) -> CapsuleResult<ProvenanceAggregate> {
        self.storage
            .get_aggregate(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    /// Most recently registered first. `None` uses the configured default.
    pub fn summary(&self, limit: Option<usize>) -> CapsuleResult<Vec<ProvenanceSummary>> {
        let summary = &self.config.summary;
        let limit = summary.clamp_limit(limit.unwrap_or(summary.default_limit));
        self.storage.summary(limit)
    }

    pub fn graph_overview(&self, limit: Option<usize>) -> CapsuleResult<OverviewGraph> {
        Ok(graph::build_overview(self.summary(limit)?))
    }

    pub fn audit_counters(&self, capsule_id: &str) -> CapsuleResult<CounterAudit> {
        self.storage
            .audit_counters(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    // --- Versions ---

    pub fn add_version(&self, version: &NewVersion) -> CapsuleResult<CapsuleVersion> {
        let _span = ledger_span!("versions", version.capsule_id).entered();
        let record = self.storage.add_version(version)?;
        events::version_added(&version.capsule_id, &record.version);
        Ok(record)
    }

    pub fn history(&self, capsule_id: &str) -> CapsuleResult<VersionHistory> {
        self.storage
            .version_history(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    /// Re-evaluate the stored capsule under its new label, append a version
    /// carrying the score and content fingerprint, then mirror score and
    /// label onto the capsule.
    pub fn record_revision(&self, request: &RevisionRequest) -> CapsuleResult<CapsuleVersion> {
        let mut capsule = self.require_capsule(&request.capsule_id)?;
        capsule.version = request.version.clone();
        let score = self.evaluate(&capsule);

        let version = self.add_version(&NewVersion {
            capsule_id: request.capsule_id.clone(),
            version: request.version.clone(),
            changes: request.changes.clone(),
            reason: request.reason.clone(),
            author: request
                .author
                .clone()
                .unwrap_or_else(|| self.config.registration.author.clone()),
            datm_score: score.to_map(),
            fingerprint: content_fingerprint(&capsule),
        })?;

        self.mirror(
            &request.capsule_id,
            "version",
            CapsuleUpdate {
                datm_score: Some(score),
                version: Some(version.version.clone()),
                ..Default::default()
            },
        )?;
        Ok(version)
    }

    // --- Relations ---

    /// Append a relation. The kind must name one of the closed relation kinds.
    pub fn add_relation(&self, request: &RelationRequest) -> CapsuleResult<EvolutionRelation> {
        let _span = ledger_span!("relations", request.capsule_id).entered();
        let kind = RelationKind::parse(&request.relation_type)?;

        let mut relation = NewRelation::new(
            request.capsule_id.clone(),
            request.related_capsule_id.clone(),
            kind,
        );
        if let Some(strength) = request.strength {
            relation = relation.with_strength(strength);
        }
        if let Some(metadata) = &request.metadata {
            relation = relation.with_metadata(metadata.clone());
        }

        let record = self.storage.add_relation(&relation)?;
        events::relation_added(
            &record.capsule_id,
            &record.related_capsule_id,
            record.relation_type.as_str(),
        );
        Ok(record)
    }

    pub fn relations(&self, capsule_id: &str) -> CapsuleResult<Evolution> {
        self.storage
            .evolution(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    /// Bounded breadth-first traversal over outgoing relations. `None` uses
    /// the configured default depth; any depth is clamped to the maximum.
    pub fn traverse(&self, root_id: &str, depth: Option<usize>) -> CapsuleResult<EvolutionGraph> {
        let traversal = &self.config.traversal;
        let bounds = TraversalBounds {
            max_depth: traversal.clamp_depth(depth.unwrap_or(traversal.default_depth)),
            max_nodes: traversal.node_budget(),
        };
        let _span = traversal_span!(root_id, bounds.max_depth).entered();

        let graph = graph::traverse(self.storage.as_ref(), root_id, bounds)?;
        if graph.truncated {
            events::traversal_truncated(root_id, bounds.max_nodes);
        }
        Ok(graph)
    }

    // --- Validations ---

    /// Append a validation. A `verified` result mirrors the verified count
    /// onto the capsule.
    pub fn add_validation(&self, request: &ValidationRequest) -> CapsuleResult<Validation> {
        let _span = ledger_span!("validations", request.capsule_id).entered();
        let (status, recognized) = ValidationStatus::parse_lenient(&request.status);
        if !recognized {
            events::validation_status_defaulted(&request.capsule_id, &request.status);
        }

        let validation = NewValidation {
            capsule_id: request.capsule_id.clone(),
            validator: request.validator.clone(),
            status,
            evidence: request.evidence.clone(),
            comments: request.comments.clone(),
            score: request.score,
        };
        let record = self.storage.add_validation(&validation)?;
        events::validation_added(&request.capsule_id, &record.validator, status.as_str());

        if status == ValidationStatus::Verified {
            let verified = self
                .storage
                .get_header(&request.capsule_id)?
                .map(|h| h.verified_count)
                .ok_or_else(|| Self::not_registered(&request.capsule_id))?;
            self.mirror(
                &request.capsule_id,
                "validations",
                CapsuleUpdate::ledger_validations(verified),
            )?;
        }
        Ok(record)
    }

    pub fn validations(&self, capsule_id: &str) -> CapsuleResult<ValidationRecord> {
        self.storage
            .validations(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    // --- Citations ---

    /// Append a citation to the target's ledger and mirror the new count
    /// onto the target capsule.
    pub fn add_citation(&self, citation: &NewCitation) -> CapsuleResult<CitationReceipt> {
        let _span = ledger_span!("citations", citation.target_capsule_id).entered();
        let receipt = self.storage.add_citation(citation)?;
        events::citation_added(
            &citation.source_capsule_id,
            &citation.target_capsule_id,
            receipt.target_citations,
        );

        self.mirror(
            &citation.target_capsule_id,
            "citations",
            CapsuleUpdate::ledger_citations(receipt.target_citations),
        )?;
        Ok(receipt)
    }

    pub fn citations(&self, capsule_id: &str) -> CapsuleResult<Citations> {
        self.storage
            .citations(capsule_id)?
            .ok_or_else(|| Self::not_registered(capsule_id))
    }

    /// Write-back onto the capsule. The ledger write has already committed,
    /// so a failure here is logged and surfaced without undoing it.
    fn mirror(&self, capsule_id: &str, field: &str, update: CapsuleUpdate) -> CapsuleResult<()> {
        self.capsules.update(capsule_id, &update).map_err(|e| {
            events::mirror_failed(capsule_id, field, &e.to_string());
            e
        })
    }
}
