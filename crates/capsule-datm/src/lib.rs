//! # capsule-datm
//!
//! Rule-based DATM evaluator: Truth, Goodness, Beauty, Intelligence.
//! Each axis starts at a fixed baseline, accumulates bounded adjustments and
//! is clamped to [0, 100]. Pure and safe to call concurrently.

pub mod axes;
pub mod engine;
pub mod formula;

pub use engine::DatmEvaluator;
