use capsule_core::constants::DATM_BASELINE;
use capsule_core::CapsuleSnapshot;

/// Intelligence: cross-topic reach, impact potential, reproducibility,
/// and whether the capsule has been revised.
pub fn calculate(capsule: &CapsuleSnapshot) -> f64 {
    let mut score = DATM_BASELINE;

    score += match capsule.topics.len() {
        n if n >= 3 => 10.0,
        n if n >= 1 => 5.0,
        _ => 0.0,
    };

    if capsule.impact_potential >= 0.7 {
        score += 10.0;
    } else if capsule.impact_potential >= 0.5 {
        score += 5.0;
    }

    if capsule.reproducibility >= 0.8 {
        score += 5.0;
    }

    if capsule.is_revised() {
        score += 5.0;
    }

    super::finish(score)
}
