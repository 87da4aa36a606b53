use std::collections::BTreeMap;

use capsule_core::models::{AxisBreakdown, DatmAxis, DatmScore, Grade, ScoreBreakdown};
use capsule_core::CapsuleSnapshot;

use crate::axes;

/// Evaluate all four axes.
pub fn compute(capsule: &CapsuleSnapshot) -> DatmScore {
    DatmScore::new(
        axes::truth::calculate(capsule),
        axes::goodness::calculate(capsule),
        axes::beauty::calculate(capsule),
        axes::intelligence::calculate(capsule),
    )
}

/// Overall score.
///
/// ```text
/// overall = mean(truth, goodness, beauty, intelligence) × confidence
/// ```
///
/// Confidence is clamped to [0.0, 1.0] so overall stays in [0, 100].
pub fn overall(score: &DatmScore, confidence: f64) -> f64 {
    score.average() * confidence.clamp(0.0, 1.0)
}

/// Per-axis score, weight and weighted contribution, plus overall and grade.
pub fn compute_breakdown(capsule: &CapsuleSnapshot) -> ScoreBreakdown {
    let score = compute(capsule);
    let axes: BTreeMap<DatmAxis, AxisBreakdown> = DatmAxis::ALL
        .iter()
        .map(|axis| {
            let value = score.axis(*axis);
            let weight = axis.weight();
            (
                *axis,
                AxisBreakdown {
                    score: value,
                    weight,
                    weighted: value * weight,
                },
            )
        })
        .collect();

    let overall = overall(&score, capsule.confidence);
    ScoreBreakdown {
        axes,
        confidence: capsule.confidence,
        overall,
        grade: Grade::from_overall(overall),
    }
}
