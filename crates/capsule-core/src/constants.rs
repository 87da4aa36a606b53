/// Capsule system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Baseline every DATM axis starts from before adjustments.
pub const DATM_BASELINE: f64 = 70.0;

/// Lower bound of a DATM axis.
pub const DATM_MIN: f64 = 0.0;

/// Upper bound of a DATM axis.
pub const DATM_MAX: f64 = 100.0;

/// Capsule version label that means "never revised".
pub const INITIAL_CAPSULE_VERSION: &str = "1.0.0";

/// Hard ceiling on traversal depth, regardless of configuration.
pub const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Hard ceiling on nodes returned by a single traversal.
pub const MAX_TRAVERSAL_NODES: usize = 1_000;

/// Node type reported for graph nodes without a provenance aggregate.
pub const UNKNOWN_NODE_TYPE: &str = "unknown";
