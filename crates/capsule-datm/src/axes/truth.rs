use capsule_core::constants::DATM_BASELINE;
use capsule_core::CapsuleSnapshot;

/// Source types treated as reliable provenance.
const RELIABLE_SOURCES: [&str; 2] = ["discussion", "agent"];

/// Truth: evidence tiers, acknowledged limitations, reliable source, confidence.
///
/// Range: 70.0 – 97.0 before clamping.
pub fn calculate(capsule: &CapsuleSnapshot) -> f64 {
    let mut score = DATM_BASELINE;

    score += match capsule.evidence.len() {
        n if n >= 5 => 15.0,
        n if n >= 3 => 10.0,
        n if n >= 1 => 5.0,
        _ => 0.0,
    };

    if !capsule.limitations.is_empty() {
        score += 5.0;
    }

    if RELIABLE_SOURCES.contains(&capsule.source_type.as_str()) {
        score += 5.0;
    }

    // Confidence contributes at most 2 points.
    let confidence = capsule.confidence.clamp(0.0, 1.0);
    score += confidence * 10.0 * 0.2;

    super::finish(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule(evidence: usize) -> CapsuleSnapshot {
        let mut c = CapsuleSnapshot::new("c", "t", "d", "i");
        c.source_type = "manual".into();
        c.confidence = 0.0;
        c.evidence = (0..evidence).map(|i| format!("e{i}")).collect();
        c
    }

    #[test]
    fn evidence_tiers() {
        assert_eq!(calculate(&capsule(0)), 70.0);
        assert_eq!(calculate(&capsule(1)), 75.0);
        assert_eq!(calculate(&capsule(3)), 80.0);
        assert_eq!(calculate(&capsule(5)), 85.0);
        assert_eq!(calculate(&capsule(12)), 85.0);
    }

    #[test]
    fn full_marks_stay_below_hundred() {
        let mut c = capsule(5);
        c.limitations = vec!["small sample".into()];
        c.source_type = "agent".into();
        c.confidence = 1.0;
        assert_eq!(calculate(&c), 97.0);
    }
}
