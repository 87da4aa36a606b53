use capsule_core::models::{DatmScore, Grade, ScoreBreakdown};
use capsule_core::traits::IEvaluator;
use capsule_core::CapsuleSnapshot;

use crate::formula;

/// DATM evaluator. Stateless: the same snapshot always yields the same score.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatmEvaluator;

impl DatmEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Overall score for a snapshot, computed from a fresh evaluation.
    pub fn overall(&self, capsule: &CapsuleSnapshot) -> f64 {
        formula::overall(&formula::compute(capsule), capsule.confidence)
    }

    pub fn grade(&self, capsule: &CapsuleSnapshot) -> Grade {
        Grade::from_overall(self.overall(capsule))
    }
}

impl IEvaluator for DatmEvaluator {
    fn evaluate(&self, capsule: &CapsuleSnapshot) -> DatmScore {
        let score = formula::compute(capsule);
        tracing::debug!(
            capsule_id = %capsule.id,
            truth = score.truth,
            goodness = score.goodness,
            beauty = score.beauty,
            intelligence = score.intelligence,
            "evaluated capsule"
        );
        score
    }

    fn score_breakdown(&self, capsule: &CapsuleSnapshot) -> ScoreBreakdown {
        formula::compute_breakdown(capsule)
    }
}
