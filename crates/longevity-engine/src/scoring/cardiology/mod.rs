//! Cardiology risk engine. Two rule sets live behind one interface: the
//! legacy v1 ladder and the two-stage v3.2 model, selected by configuration.

mod v1;
mod v32;

use crate::config::CardiologyModelVersion;
use serde::{Deserialize, Serialize};

pub use v32::{PhysiologyDetail, TwoStageDetail};

/// Flat bag of optional cardiac signals. Every field is independently
/// absent-able; absence degrades the relevant predicate instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardiologyInputs {
    /// Clinical ASCVD history. When true, the legacy category is SEVERE no
    /// matter what the scores say.
    pub ascvd_history: Option<bool>,
    pub cac_score: Option<f64>,
    pub cac_percentile: Option<f64>,
    /// Worst stenosis on CT angiography, percent.
    pub cta_max_stenosis_pct: Option<f64>,
    /// Qualitative CTA impression, free text.
    pub cta_qualitative: Option<String>,
    /// Plaque severity from other imaging (e.g. carotid ultrasound).
    pub plaque_imaging: Option<String>,
    /// Left-ventricular ejection fraction, percent.
    pub ejection_fraction: Option<f64>,
    /// Structural abnormality severity, free text.
    pub structural_abnormality: Option<String>,
    pub duke_treadmill_score: Option<f64>,
    /// ECG finding severity, free text.
    pub ecg_finding: Option<String>,
    /// Externally supplied modifiable-risk score, clamped to [0, 70].
    pub modifiable_score: Option<f64>,
    // Age context carried into the explanation only.
    pub health_age_years: Option<f64>,
    pub performance_age_years: Option<f64>,
    pub phenotypic_age_years: Option<f64>,
}

/// Backward-compatible 4-bucket category consumed by older report templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegacyRiskCategory {
    Low,
    Mild,
    Moderate,
    Severe,
}

impl LegacyRiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            LegacyRiskCategory::Low => "LOW",
            LegacyRiskCategory::Mild => "MILD",
            LegacyRiskCategory::Moderate => "MODERATE",
            LegacyRiskCategory::Severe => "SEVERE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardiologyResult {
    pub legacy_category: LegacyRiskCategory,
    /// Deterministic, assessment-only explanation built from the computed
    /// facts. Never prescriptive.
    pub explanation: String,
    /// Present for the two-stage model only.
    pub two_stage: Option<TwoStageDetail>,
}

pub fn evaluate(version: CardiologyModelVersion, inputs: &CardiologyInputs) -> CardiologyResult {
    match version {
        CardiologyModelVersion::V1 => v1::evaluate(inputs),
        CardiologyModelVersion::V32 => v32::evaluate(inputs),
    }
}
