//! StorageEngine: owns the ConnectionPool, runs migrations on open, and
//! implements IProvenanceStorage + ICapsuleStore.

use std::path::Path;

use rusqlite::Connection;

use capsule_core::config::StorageConfig;
use capsule_core::errors::CapsuleResult;
use capsule_core::models::{
    CapsuleSnapshot, CapsuleUpdate, CapsuleVersion, CitationReceipt, Citations, CounterAudit,
    Evolution, EvolutionRelation, NewCitation, NewRegistration, NewRelation, NewValidation,
    NewVersion, ProvenanceAggregate, ProvenanceHeader, ProvenanceSummary, Validation,
    ValidationRecord, VersionHistory,
};
use capsule_core::traits::{ICapsuleStore, IProvenanceStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{
    aggregate_ops, audit_ops, capsule_ops, citation_ops, provenance_ops, relation_ops,
    summary_ops, validation_ops, version_ops,
};
use crate::to_storage_err;
use crate::tx::with_immediate_transaction;

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk with default settings.
    pub fn open(path: &Path) -> CapsuleResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> CapsuleResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        tracing::info!(
            path = %path.display(),
            readers = engine.pool.readers.size(),
            "storage opened"
        );
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> CapsuleResult<Self> {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default())?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> CapsuleResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Current schema version.
    pub fn schema_version(&self) -> CapsuleResult<u32> {
        self.pool.writer.with_conn_sync(migrations::current_version)
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    pub fn with_reader<F, T>(&self, f: F) -> CapsuleResult<T>
    where
        F: FnOnce(&Connection) -> CapsuleResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Multi-statement read inside one deferred transaction, so every
    /// statement sees the same committed state.
    fn with_snapshot<F, T>(&self, f: F) -> CapsuleResult<T>
    where
        F: FnOnce(&Connection) -> CapsuleResult<T>,
    {
        self.with_reader(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let out = f(&tx)?;
            tx.finish().map_err(|e| to_storage_err(e.to_string()))?;
            Ok(out)
        })
    }

    /// Run a write closure inside BEGIN IMMEDIATE on the writer.
    fn write<F, T>(&self, f: F) -> CapsuleResult<T>
    where
        F: FnOnce(&Connection) -> CapsuleResult<T>,
    {
        self.pool
            .writer
            .with_conn_sync(|conn| with_immediate_transaction(conn, f))
    }

    // --- Capsule collaborator table ---

    /// Insert a capsule. Fails with `CapsuleExists` on a duplicate id.
    pub fn create_capsule(&self, capsule: &CapsuleSnapshot) -> CapsuleResult<()> {
        self.write(|conn| capsule_ops::insert_capsule(conn, capsule))?;
        tracing::debug!(capsule_id = %capsule.id, "capsule created");
        Ok(())
    }

    /// Capsules newest first.
    pub fn list_capsules(&self, limit: usize, offset: usize) -> CapsuleResult<Vec<CapsuleSnapshot>> {
        self.with_reader(|conn| capsule_ops::list_capsules(conn, limit, offset))
    }

    pub fn count_capsules(&self) -> CapsuleResult<u64> {
        self.with_reader(capsule_ops::count_capsules)
    }

    /// Number of registered provenance aggregates.
    pub fn count_registered(&self) -> CapsuleResult<u64> {
        self.with_reader(summary_ops::count_registered)
    }
}

impl ICapsuleStore for StorageEngine {
    fn get(&self, id: &str) -> CapsuleResult<Option<CapsuleSnapshot>> {
        self.with_reader(|conn| capsule_ops::get_capsule(conn, id))
    }

    fn update(&self, id: &str, update: &CapsuleUpdate) -> CapsuleResult<()> {
        self.write(|conn| capsule_ops::update_capsule(conn, id, update))
    }
}

impl IProvenanceStorage for StorageEngine {
    fn register(&self, registration: &NewRegistration) -> CapsuleResult<ProvenanceAggregate> {
        registration.validate()?;
        let aggregate = self.write(|conn| provenance_ops::insert_registration(conn, registration))?;
        tracing::debug!(
            capsule_id = %registration.capsule_id,
            version = %registration.initial_version,
            "provenance registered"
        );
        Ok(aggregate)
    }

    fn get_header(&self, capsule_id: &str) -> CapsuleResult<Option<ProvenanceHeader>> {
        self.with_reader(|conn| provenance_ops::get_header(conn, capsule_id))
    }

    fn get_aggregate(&self, capsule_id: &str) -> CapsuleResult<Option<ProvenanceAggregate>> {
        self.with_snapshot(|conn| aggregate_ops::load_aggregate(conn, capsule_id))
    }

    fn summary(&self, limit: usize) -> CapsuleResult<Vec<ProvenanceSummary>> {
        self.with_reader(|conn| summary_ops::summary(conn, limit))
    }

    fn audit_counters(&self, capsule_id: &str) -> CapsuleResult<Option<CounterAudit>> {
        self.with_snapshot(|conn| audit_ops::audit_counters(conn, capsule_id))
    }

    fn add_version(&self, version: &NewVersion) -> CapsuleResult<CapsuleVersion> {
        version.validate()?;
        self.write(|conn| version_ops::append_version(conn, version))
    }

    fn version_history(&self, capsule_id: &str) -> CapsuleResult<Option<VersionHistory>> {
        self.with_snapshot(|conn| aggregate_ops::load_history(conn, capsule_id))
    }

    fn add_relation(&self, relation: &NewRelation) -> CapsuleResult<EvolutionRelation> {
        relation.validate()?;
        self.write(|conn| relation_ops::append_relation(conn, relation))
    }

    fn outgoing_relations(&self, capsule_id: &str) -> CapsuleResult<Vec<EvolutionRelation>> {
        self.with_reader(|conn| relation_ops::load_outgoing(conn, capsule_id))
    }

    fn evolution(&self, capsule_id: &str) -> CapsuleResult<Option<Evolution>> {
        self.with_snapshot(|conn| aggregate_ops::load_evolution(conn, capsule_id))
    }

    fn add_validation(&self, validation: &NewValidation) -> CapsuleResult<Validation> {
        validation.validate()?;
        self.write(|conn| validation_ops::append_validation(conn, validation))
    }

    fn validations(&self, capsule_id: &str) -> CapsuleResult<Option<ValidationRecord>> {
        self.with_snapshot(|conn| aggregate_ops::load_validation_record(conn, capsule_id))
    }

    fn add_citation(&self, citation: &NewCitation) -> CapsuleResult<CitationReceipt> {
        citation.validate()?;
        self.write(|conn| citation_ops::append_citation(conn, citation))
    }

    fn citations(&self, capsule_id: &str) -> CapsuleResult<Option<Citations>> {
        self.with_snapshot(|conn| aggregate_ops::load_citations(conn, capsule_id))
    }
}
