//! Shared machinery for the wellness scorers (BrainHealth, LongevityMindset,
//! MentallyEmotionallyWell, BeConnected): weighted 0-100 domain scoring,
//! level thresholds, and trend detection against a prior assessment.

pub mod brain;
pub mod connected;
pub mod emotional;
pub mod mindset;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_DELTA: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Worsening,
    /// No prior assessment on file. Never collapsed into Stable.
    Unknown,
}

/// Compare a current score against a prior one. Movement smaller than
/// `delta` in either direction reads Stable.
pub fn detect_trend(current: f64, prior: Option<f64>, delta: f64) -> Trend {
    match prior {
        None => Trend::Unknown,
        Some(prior) if current - prior >= delta => Trend::Improving,
        Some(prior) if prior - current >= delta => Trend::Worsening,
        Some(_) => Trend::Stable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellnessLevel {
    Optimal,
    Healthy,
    NeedsAttention,
}

impl WellnessLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Optimal
        } else if score >= 70.0 {
            Self::Healthy
        } else {
            Self::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// A prior assessment used for trend detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorAssessment {
    pub score: f64,
    pub assessed_on: Option<NaiveDate>,
}

/// One weighted domain's contribution, kept for audit so the composite can
/// be rebuilt from its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainContribution {
    pub domain: &'static str,
    pub raw: Option<f64>,
    pub points: f64,
    pub weight: f64,
    pub weighted_points: f64,
    pub notes: String,
}

impl DomainContribution {
    pub(crate) fn measured(
        domain: &'static str,
        raw: f64,
        points: f64,
        weight: f64,
        notes: String,
    ) -> Self {
        Self {
            domain,
            raw: Some(raw),
            points,
            weight,
            weighted_points: points * weight,
            notes,
        }
    }

    /// A domain with no input scores its best band; the notes make the
    /// defaulting visible in the audit trail.
    pub(crate) fn defaulted(domain: &'static str, points: f64, weight: f64) -> Self {
        Self {
            domain,
            raw: None,
            points,
            weight,
            weighted_points: points * weight,
            notes: format!("no {domain} measure on file; defaulted to best band"),
        }
    }
}

/// Band points over a 0-100 normalized value.
pub(crate) fn band_points(normalized: f64) -> f64 {
    if normalized >= 75.0 {
        100.0
    } else if normalized >= 50.0 {
        70.0
    } else if normalized >= 25.0 {
        40.0
    } else {
        20.0
    }
}

/// Linear min-max normalization onto 0-100, clamped at the scale ends.
pub(crate) fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// PROMIS symptom T-score bands (depression, anxiety, sleep disturbance).
/// Higher T means worse symptoms.
pub(crate) fn promis_symptom_points(t_score: f64) -> (f64, &'static str) {
    if t_score < 55.0 {
        (100.0, "within normal limits")
    } else if t_score < 60.0 {
        (90.0, "mildly elevated")
    } else if t_score < 70.0 {
        (40.0, "moderately elevated")
    } else {
        (20.0, "severely elevated")
    }
}

/// Perceived Stress Scale (0-40) bands.
pub(crate) fn perceived_stress_points(score: f64) -> (f64, &'static str) {
    if score <= 13.0 {
        (100.0, "low perceived stress")
    } else if score <= 26.0 {
        (60.0, "moderate perceived stress")
    } else {
        (20.0, "high perceived stress")
    }
}
