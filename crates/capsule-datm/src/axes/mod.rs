//! One module per DATM axis. Each returns the axis value rounded to one decimal.

pub mod beauty;
pub mod goodness;
pub mod intelligence;
pub mod truth;

use capsule_core::constants::{DATM_MAX, DATM_MIN};

/// Clamp into [0, 100] and round to one decimal place.
pub(crate) fn finish(score: f64) -> f64 {
    let clamped = score.clamp(DATM_MIN, DATM_MAX);
    (clamped * 10.0).round() / 10.0
}

/// Length in characters, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
