use capsule_core::constants::DATM_BASELINE;
use capsule_core::CapsuleSnapshot;

use super::char_len;

/// Beauty: concise title, well-sized insight, complete classification.
pub fn calculate(capsule: &CapsuleSnapshot) -> f64 {
    let mut score = DATM_BASELINE;

    let title_len = char_len(&capsule.title);
    if (10..=80).contains(&title_len) {
        score += 10.0;
    } else if title_len > 100 {
        score -= 5.0;
    }

    let insight_len = char_len(&capsule.insight);
    if (20..=200).contains(&insight_len) {
        score += 10.0;
    } else if insight_len > 300 {
        score -= 5.0;
    }

    if !capsule.domain.is_empty() && !capsule.topics.is_empty() {
        score += 10.0;
    }

    super::finish(score)
}
