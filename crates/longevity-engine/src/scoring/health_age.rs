//! HealthAge composite: seven metabolic/vascular factors, each mapped through
//! its own step function to a signed percent-of-age adjustment. A factor whose
//! inputs are absent contributes nothing and is excluded from the factor list;
//! absence is never read as an optimal or worst band.

use super::{require_positive, FactorContribution, ScoringError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthFactor {
    BodyFat,
    VisceralFat,
    BloodPressure,
    NonHdl,
    HomaIr,
    TgHdlRatio,
    Fib4,
}

/// Cardiovascular risk grouping that selects the non-HDL target. Controlled
/// vocabulary; anything else is an InvalidInput, not free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonHdlRiskGroup {
    Low,
    Borderline,
    Intermediate,
    High,
}

impl NonHdlRiskGroup {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "borderline" => Ok(Self::Borderline),
            "intermediate" => Ok(Self::Intermediate),
            "high" => Ok(Self::High),
            _ => Err(ScoringError::unknown_vocabulary("non_hdl_risk_group", value)),
        }
    }

    /// mg/dL treatment target for the group.
    fn target(self) -> f64 {
        match self {
            Self::Low => 160.0,
            Self::Borderline => 145.0,
            Self::Intermediate => 130.0,
            Self::High => 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthAgeInputs {
    pub chronological_age: f64,
    /// PhenoAge output; the baseline this composite adjusts. Callers that
    /// compute PhenoAge in the same request fill this in afterwards, so it
    /// may be omitted on the wire (validation still requires it positive).
    #[serde(default)]
    pub phenotypic_age_years: f64,
    pub body_fat_percentile: Option<f64>,
    pub visceral_fat_percentile: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    /// mg/dL; only scored together with a risk group.
    pub non_hdl: Option<f64>,
    pub non_hdl_risk_group: Option<String>,
    pub homa_ir: Option<f64>,
    pub tg_hdl_ratio: Option<f64>,
    pub fib4: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAgeResult {
    pub health_age_years: f64,
    pub delta_years: f64,
    pub delta_percent: f64,
    pub sum_contribution_years: f64,
    pub scaled_adjustment_years: f64,
    pub factors: Vec<FactorContribution<HealthFactor>>,
}

/// Step function for percentiles where lower is better (body fat stores).
fn lower_is_better_percentile(percentile: f64) -> (f64, &'static str) {
    if percentile > 85.0 {
        (0.15, "above the 85th percentile")
    } else if percentile > 50.0 {
        (0.05, "above the 50th percentile")
    } else if percentile > 20.0 {
        (0.0, "mid-range percentile")
    } else {
        (-0.15, "at or below the 20th percentile")
    }
}

fn blood_pressure_percent(systolic: f64, diastolic: f64) -> (f64, &'static str) {
    if systolic < 120.0 && diastolic < 80.0 {
        (-0.10, "optimal blood pressure")
    } else if systolic < 130.0 && diastolic < 85.0 {
        (0.0, "normal blood pressure")
    } else if systolic < 140.0 && diastolic < 90.0 {
        (0.05, "elevated blood pressure")
    } else {
        (0.15, "hypertensive-range blood pressure")
    }
}

fn non_hdl_percent(value: f64, group: NonHdlRiskGroup) -> (f64, String) {
    let target = group.target();
    let (percent, phrase) = if value <= target - 30.0 {
        (-0.05, "well under the risk-group target")
    } else if value <= target {
        (0.0, "within the risk-group target")
    } else if value <= target + 30.0 {
        (0.075, "above the risk-group target")
    } else {
        (0.15, "far above the risk-group target")
    };
    (
        percent,
        format!("non-HDL {value:.0} mg/dL {phrase} ({target:.0} mg/dL)"),
    )
}

fn homa_ir_percent(value: f64) -> (f64, &'static str) {
    if value < 1.0 {
        (-0.10, "insulin sensitive")
    } else if value < 2.0 {
        (0.0, "within reference")
    } else if value < 2.9 {
        (0.075, "early insulin resistance")
    } else {
        (0.15, "insulin resistance")
    }
}

fn tg_hdl_percent(value: f64) -> (f64, &'static str) {
    if value < 1.0 {
        (-0.10, "optimal ratio")
    } else if value < 2.0 {
        (0.0, "acceptable ratio")
    } else if value < 3.0 {
        (0.075, "elevated ratio")
    } else {
        (0.15, "high ratio")
    }
}

fn fib4_percent(value: f64) -> (f64, &'static str) {
    if value < 1.3 {
        (-0.05, "below the fibrosis cutoff")
    } else if value < 2.67 {
        (0.075, "indeterminate fibrosis band")
    } else {
        (0.15, "above the advanced-fibrosis cutoff")
    }
}

pub fn health_age(inputs: &HealthAgeInputs) -> Result<HealthAgeResult, ScoringError> {
    let age = require_positive("chronological_age", inputs.chronological_age)?;
    let phenotypic_age = require_positive("phenotypic_age_years", inputs.phenotypic_age_years)?;

    let mut factors = Vec::new();

    if let Some(percentile) = inputs.body_fat_percentile {
        let (percent, phrase) = lower_is_better_percentile(percentile);
        factors.push(FactorContribution::new(
            HealthFactor::BodyFat,
            percent,
            age,
            format!("body fat {phrase} ({percentile:.0})"),
        ));
    }

    if let Some(percentile) = inputs.visceral_fat_percentile {
        let (percent, phrase) = lower_is_better_percentile(percentile);
        factors.push(FactorContribution::new(
            HealthFactor::VisceralFat,
            percent,
            age,
            format!("visceral fat {phrase} ({percentile:.0})"),
        ));
    }

    // A lone systolic or diastolic reading would score a misleading
    // single-sided band, so the pair is all or nothing.
    if let (Some(systolic), Some(diastolic)) = (inputs.systolic_bp, inputs.diastolic_bp) {
        let (percent, phrase) = blood_pressure_percent(systolic, diastolic);
        factors.push(FactorContribution::new(
            HealthFactor::BloodPressure,
            percent,
            age,
            format!("{phrase} ({systolic:.0}/{diastolic:.0})"),
        ));
    }

    if let (Some(value), Some(group_text)) = (inputs.non_hdl, inputs.non_hdl_risk_group.as_deref())
    {
        let group = NonHdlRiskGroup::parse(group_text)?;
        let (percent, notes) = non_hdl_percent(value, group);
        factors.push(FactorContribution::new(
            HealthFactor::NonHdl,
            percent,
            age,
            notes,
        ));
    }

    if let Some(value) = inputs.homa_ir {
        let (percent, phrase) = homa_ir_percent(value);
        factors.push(FactorContribution::new(
            HealthFactor::HomaIr,
            percent,
            age,
            format!("HOMA-IR {value:.2}: {phrase}"),
        ));
    }

    if let Some(value) = inputs.tg_hdl_ratio {
        let (percent, phrase) = tg_hdl_percent(value);
        factors.push(FactorContribution::new(
            HealthFactor::TgHdlRatio,
            percent,
            age,
            format!("TG/HDL {value:.2}: {phrase}"),
        ));
    }

    if let Some(value) = inputs.fib4 {
        let (percent, phrase) = fib4_percent(value);
        factors.push(FactorContribution::new(
            HealthFactor::Fib4,
            percent,
            age,
            format!("FIB-4 {value:.2}: {phrase}"),
        ));
    }

    let sum_contribution_years: f64 = factors.iter().map(|f| f.contribution_years).sum();
    let scaled_adjustment_years = sum_contribution_years * 0.3;
    let health_age_years = phenotypic_age + scaled_adjustment_years;
    let delta_years = health_age_years - age;

    Ok(HealthAgeResult {
        health_age_years,
        delta_years,
        delta_percent: delta_years / age * 100.0,
        sum_contribution_years,
        scaled_adjustment_years,
        factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_inputs() -> HealthAgeInputs {
        HealthAgeInputs {
            chronological_age: 50.0,
            phenotypic_age_years: 48.0,
            ..HealthAgeInputs::default()
        }
    }

    #[test]
    fn absent_factors_are_excluded_not_zeroed() {
        let mut inputs = base_inputs();
        inputs.visceral_fat_percentile = Some(90.0);

        let result = health_age(&inputs).expect("scores");
        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].factor, HealthFactor::VisceralFat);
        assert!((result.factors[0].contribution_years - 7.5).abs() < 1e-9);
    }

    #[test]
    fn partial_blood_pressure_pair_is_not_scored() {
        let mut inputs = base_inputs();
        inputs.systolic_bp = Some(150.0);

        let result = health_age(&inputs).expect("scores");
        assert!(result.factors.is_empty());
        assert_eq!(result.health_age_years, 48.0);
    }

    #[test]
    fn non_hdl_requires_a_recognized_risk_group() {
        let mut inputs = base_inputs();
        inputs.non_hdl = Some(150.0);
        inputs.non_hdl_risk_group = Some("medium-ish".to_string());

        let err = health_age(&inputs).expect_err("controlled vocabulary");
        assert_eq!(err.field(), "non_hdl_risk_group");
    }

    #[test]
    fn non_hdl_value_without_group_is_excluded() {
        let mut inputs = base_inputs();
        inputs.non_hdl = Some(150.0);

        let result = health_age(&inputs).expect("scores");
        assert!(result.factors.is_empty());
    }

    #[test]
    fn composite_builds_on_phenotypic_age() {
        let mut inputs = base_inputs();
        inputs.visceral_fat_percentile = Some(10.0);

        let result = health_age(&inputs).expect("scores");
        // -15% of 50 = -7.5 contribution years, scaled by 0.3.
        assert!((result.sum_contribution_years + 7.5).abs() < 1e-9);
        assert!((result.health_age_years - (48.0 - 2.25)).abs() < 1e-9);
        assert!((result.delta_years - (45.75 - 50.0)).abs() < 1e-9);
    }
}
