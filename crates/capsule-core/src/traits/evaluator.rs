use crate::models::{CapsuleSnapshot, DatmScore, ScoreBreakdown};

/// Deterministic capsule quality scoring. Implementations must be pure.
pub trait IEvaluator: Send + Sync {
    fn evaluate(&self, capsule: &CapsuleSnapshot) -> DatmScore;
    fn score_breakdown(&self, capsule: &CapsuleSnapshot) -> ScoreBreakdown;
}
