//! DATM quality score: Truth, Goodness, Beauty, Intelligence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DATM_MAX, DATM_MIN};

/// One of the four DATM axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatmAxis {
    /// Factual accuracy.
    Truth,
    /// Value alignment.
    Goodness,
    /// Expressive clarity.
    Beauty,
    /// Insight depth.
    Intelligence,
}

impl DatmAxis {
    pub const ALL: [DatmAxis; 4] = [
        Self::Truth,
        Self::Goodness,
        Self::Beauty,
        Self::Intelligence,
    ];

    /// Fixed weight of this axis in the score breakdown. Weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Truth => 0.35,
            Self::Goodness => 0.20,
            Self::Beauty => 0.15,
            Self::Intelligence => 0.30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truth => "truth",
            Self::Goodness => "goodness",
            Self::Beauty => "beauty",
            Self::Intelligence => "intelligence",
        }
    }
}

impl std::fmt::Display for DatmAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four bounded axis values in [0, 100]. Recomputed, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatmScore {
    pub truth: f64,
    pub goodness: f64,
    pub beauty: f64,
    pub intelligence: f64,
}

impl DatmScore {
    /// Build a score, clamping every axis into [0, 100].
    pub fn new(truth: f64, goodness: f64, beauty: f64, intelligence: f64) -> Self {
        Self {
            truth: clamp_axis(truth),
            goodness: clamp_axis(goodness),
            beauty: clamp_axis(beauty),
            intelligence: clamp_axis(intelligence),
        }
    }

    pub fn axis(&self, axis: DatmAxis) -> f64 {
        match axis {
            DatmAxis::Truth => self.truth,
            DatmAxis::Goodness => self.goodness,
            DatmAxis::Beauty => self.beauty,
            DatmAxis::Intelligence => self.intelligence,
        }
    }

    /// Unweighted mean of the four axes.
    pub fn average(&self) -> f64 {
        (self.truth + self.goodness + self.beauty + self.intelligence) / 4.0
    }

    /// Axis-name keyed map, the shape persisted on version records.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        DatmAxis::ALL
            .iter()
            .map(|axis| (axis.as_str().to_string(), self.axis(*axis)))
            .collect()
    }

    /// Rebuild from a persisted map. Missing axes yield `None`.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Option<Self> {
        Some(Self::new(
            *map.get("truth")?,
            *map.get("goodness")?,
            *map.get("beauty")?,
            *map.get("intelligence")?,
        ))
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        return DATM_MIN;
    }
    value.clamp(DATM_MIN, DATM_MAX)
}

/// Letter grade derived from the overall score. Ordered `D < C < B < A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
}

impl Grade {
    /// ≥80 → A, ≥60 → B, ≥40 → C, else D. Boundaries are inclusive.
    pub fn from_overall(overall: f64) -> Self {
        if overall >= 80.0 {
            Self::A
        } else if overall >= 60.0 {
            Self::B
        } else if overall >= 40.0 {
            Self::C
        } else {
            Self::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-axis entry of a score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBreakdown {
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Full breakdown: each axis with its weight, plus overall score and grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub axes: BTreeMap<DatmAxis, AxisBreakdown>,
    pub confidence: f64,
    pub overall: f64,
    pub grade: Grade,
}

impl ScoreBreakdown {
    pub fn axis(&self, axis: DatmAxis) -> Option<&AxisBreakdown> {
        self.axes.get(&axis)
    }
}
