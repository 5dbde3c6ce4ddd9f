//! PerformanceAge composite: six functional-capacity percentiles, each mapped
//! through the higher-is-better ladder and aggregated onto chronological age.
//! The null-safe exclusion rule from HealthAge applies unchanged.

use super::{require_positive, FactorContribution, ScoringError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceFactor {
    Vo2Max,
    GaitSpeed,
    GripStrength,
    LegPower,
    Balance,
    ChairRise,
}

impl PerformanceFactor {
    fn label(self) -> &'static str {
        match self {
            Self::Vo2Max => "VO2max",
            Self::GaitSpeed => "gait speed",
            Self::GripStrength => "grip strength",
            Self::LegPower => "leg power",
            Self::Balance => "balance",
            Self::ChairRise => "chair rise",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAgeInputs {
    pub chronological_age: f64,
    pub vo2max_percentile: Option<f64>,
    pub gait_speed_percentile: Option<f64>,
    pub grip_strength_percentile: Option<f64>,
    pub leg_power_percentile: Option<f64>,
    pub balance_percentile: Option<f64>,
    pub chair_rise_percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAgeResult {
    pub performance_age_years: f64,
    pub delta_years: f64,
    pub delta_percent: f64,
    pub sum_contribution_years: f64,
    pub scaled_adjustment_years: f64,
    pub factors: Vec<FactorContribution<PerformanceFactor>>,
}

/// Step function for percentiles where higher is better.
fn higher_is_better_percentile(percentile: f64) -> (f64, &'static str) {
    if percentile >= 75.0 {
        (-0.15, "at or above the 75th percentile")
    } else if percentile >= 50.0 {
        (-0.05, "at or above the 50th percentile")
    } else if percentile >= 25.0 {
        (0.05, "below the 50th percentile")
    } else {
        (0.15, "below the 25th percentile")
    }
}

pub fn performance_age(inputs: &PerformanceAgeInputs) -> Result<PerformanceAgeResult, ScoringError> {
    let age = require_positive("chronological_age", inputs.chronological_age)?;

    let available = [
        (PerformanceFactor::Vo2Max, inputs.vo2max_percentile),
        (PerformanceFactor::GaitSpeed, inputs.gait_speed_percentile),
        (
            PerformanceFactor::GripStrength,
            inputs.grip_strength_percentile,
        ),
        (PerformanceFactor::LegPower, inputs.leg_power_percentile),
        (PerformanceFactor::Balance, inputs.balance_percentile),
        (PerformanceFactor::ChairRise, inputs.chair_rise_percentile),
    ];

    let factors: Vec<_> = available
        .into_iter()
        .filter_map(|(factor, percentile)| {
            percentile.map(|value| {
                let (percent, phrase) = higher_is_better_percentile(value);
                FactorContribution::new(
                    factor,
                    percent,
                    age,
                    format!("{} {phrase} ({value:.0})", factor.label()),
                )
            })
        })
        .collect();

    let sum_contribution_years: f64 = factors.iter().map(|f| f.contribution_years).sum();
    let scaled_adjustment_years = sum_contribution_years * 0.3;
    let performance_age_years = age + scaled_adjustment_years;
    let delta_years = performance_age_years - age;

    Ok(PerformanceAgeResult {
        performance_age_years,
        delta_years,
        delta_percent: delta_years / age * 100.0,
        sum_contribution_years,
        scaled_adjustment_years,
        factors,
    })
}
