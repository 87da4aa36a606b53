//! # capsule-core
//!
//! Foundation crate for the capsule provenance system.
//! Defines the data model, error taxonomy, config, constants and the
//! storage/collaborator traits. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CapsuleConfig;
pub use errors::{CapsuleError, CapsuleResult, ErrorClass};
pub use models::{CapsuleSnapshot, DatmScore, Grade, RelationKind, ValidationStatus};
