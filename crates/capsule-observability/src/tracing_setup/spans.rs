//! Span definitions per operation: registration, ledger append, traversal, evaluation.

/// Create a registration span.
#[macro_export]
macro_rules! register_span {
    ($capsule_id:expr) => {
        tracing::info_span!("capsule.register", capsule_id = %$capsule_id)
    };
}

/// Create a ledger append span. `$ledger` is one of versions, relations,
/// validations, citations.
#[macro_export]
macro_rules! ledger_span {
    ($ledger:expr, $capsule_id:expr) => {
        tracing::info_span!("capsule.ledger", ledger = %$ledger, capsule_id = %$capsule_id)
    };
}

/// Create a graph traversal span.
#[macro_export]
macro_rules! traversal_span {
    ($root_id:expr, $depth:expr) => {
        tracing::info_span!("capsule.traversal", root_id = %$root_id, depth = $depth)
    };
}

/// Create an evaluation span.
#[macro_export]
macro_rules! evaluation_span {
    ($capsule_id:expr) => {
        tracing::debug_span!("capsule.evaluation", capsule_id = %$capsule_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REGISTER: &str = "capsule.register";
    pub const LEDGER: &str = "capsule.ledger";
    pub const TRAVERSAL: &str = "capsule.traversal";
    pub const EVALUATION: &str = "capsule.evaluation";
}
