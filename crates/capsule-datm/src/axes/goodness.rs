use capsule_core::constants::DATM_BASELINE;
use capsule_core::CapsuleSnapshot;

/// Goodness: actionable guidance, stated applicability, collaboration.
pub fn calculate(capsule: &CapsuleSnapshot) -> f64 {
    let mut score = DATM_BASELINE;

    score += match capsule.action_items.len() {
        n if n >= 3 => 15.0,
        n if n >= 1 => 10.0,
        _ => 0.0,
    };

    if !capsule.applicability.is_empty() {
        score += 10.0;
    }

    if capsule.authors.len() >= 3 {
        score += 5.0;
    }

    super::finish(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bonuses_reach_hundred() {
        let mut c = CapsuleSnapshot::new("c", "t", "d", "i");
        c.action_items = vec!["a".into(), "b".into(), "c".into()];
        c.applicability = "lab settings".into();
        c.authors = vec!["x".into(), "y".into(), "z".into()];
        assert_eq!(calculate(&c), 100.0);
    }

    #[test]
    fn any_nonempty_applicability_counts() {
        let mut c = CapsuleSnapshot::new("c", "t", "d", "i");
        assert_eq!(calculate(&c), 70.0);
        c.applicability = "   ".into();
        assert_eq!(calculate(&c), 80.0);
    }
}
