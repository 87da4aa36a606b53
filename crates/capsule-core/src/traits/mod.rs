mod capsule_store;
mod evaluator;
mod provenance_storage;

pub use capsule_store::ICapsuleStore;
pub use evaluator::IEvaluator;
pub use provenance_storage::IProvenanceStorage;
