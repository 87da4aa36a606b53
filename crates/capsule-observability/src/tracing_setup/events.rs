//! Structured log events for provenance state changes.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a provenance registration.
pub fn capsule_registered(capsule_id: &str, source_type: &str, version: &str) {
    tracing::info!(
        event = "capsule_registered",
        capsule_id = %capsule_id,
        source_type = %source_type,
        version = %version,
        "capsule registered"
    );
}

/// Log a version append.
pub fn version_added(capsule_id: &str, version: &str) {
    tracing::info!(
        event = "version_added",
        capsule_id = %capsule_id,
        version = %version,
        "version added"
    );
}

/// Log an evolution relation append.
pub fn relation_added(capsule_id: &str, related_capsule_id: &str, relation_type: &str) {
    tracing::info!(
        event = "relation_added",
        capsule_id = %capsule_id,
        related_capsule_id = %related_capsule_id,
        relation_type = %relation_type,
        "relation added"
    );
}

/// Log a validation append.
pub fn validation_added(capsule_id: &str, validator: &str, status: &str) {
    tracing::info!(
        event = "validation_added",
        capsule_id = %capsule_id,
        validator = %validator,
        status = %status,
        "validation added"
    );
}

/// Log an unrecognized validation status that was stored as pending.
pub fn validation_status_defaulted(capsule_id: &str, raw_status: &str) {
    tracing::warn!(
        event = "validation_status_defaulted",
        capsule_id = %capsule_id,
        raw_status = %raw_status,
        "unknown validation status, recorded as pending"
    );
}

/// Log a citation append.
pub fn citation_added(source_capsule_id: &str, target_capsule_id: &str, target_citations: u64) {
    tracing::info!(
        event = "citation_added",
        source_capsule_id = %source_capsule_id,
        target_capsule_id = %target_capsule_id,
        target_citations = target_citations,
        "citation added"
    );
}

/// Log a failed write-back onto the capsule after the ledger committed.
pub fn mirror_failed(capsule_id: &str, field: &str, error: &str) {
    tracing::warn!(
        event = "mirror_failed",
        capsule_id = %capsule_id,
        field = %field,
        error = %error,
        "capsule mirror update failed"
    );
}

/// Log a traversal that stopped at the node budget.
pub fn traversal_truncated(root_id: &str, node_budget: usize) {
    tracing::warn!(
        event = "traversal_truncated",
        root_id = %root_id,
        node_budget = node_budget,
        "traversal stopped at node budget"
    );
}
