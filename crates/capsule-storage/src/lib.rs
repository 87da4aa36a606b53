//! # capsule-storage
//!
//! SQLite persistence layer: the capsule collaborator table, one row per
//! registered provenance aggregate, and an append-only table per ledger.
//! Each append and its counter update commit or roll back together.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod tx;

pub use engine::StorageEngine;

use capsule_core::errors::{CapsuleError, StorageError};

/// Convert a message into a `CapsuleError::StorageError`.
pub fn to_storage_err(message: String) -> CapsuleError {
    CapsuleError::StorageError(StorageError::SqliteError { message })
}
