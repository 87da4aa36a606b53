//! # capsule-observability
//!
//! Structured JSON tracing with span definitions for registration, ledger
//! appends, traversal, and evaluation, plus one log event per provenance
//! state change.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
