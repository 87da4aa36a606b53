// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "capsules.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Traversal ---
pub const DEFAULT_TRAVERSAL_DEPTH: usize = 3;
pub const DEFAULT_TRAVERSAL_MAX_DEPTH: usize = 5;
pub const DEFAULT_TRAVERSAL_MAX_NODES: usize = 50;

// --- Summary ---
pub const DEFAULT_SUMMARY_LIMIT: usize = 50;
pub const DEFAULT_SUMMARY_MAX_LIMIT: usize = 200;

// --- Registration ---
pub const DEFAULT_INITIAL_VERSION: &str = "v1.0.0";
pub const DEFAULT_AUTHOR: &str = "system";
pub const DEFAULT_SOURCE_TYPE: &str = "manual";
pub const DEFAULT_INITIAL_REASON: &str = "initial creation";
pub const DEFAULT_INITIAL_CHANGES: &str = "Initial version";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
