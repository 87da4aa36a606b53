//! Evolution graph queries: bounded live traversal and the summary-based overview.

pub mod overview;
pub mod traversal;

pub use overview::build_overview;
pub use traversal::{traverse, TraversalBounds};
