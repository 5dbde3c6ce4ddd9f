pub mod cardiology;
pub mod health_age;
pub mod metabolic;
pub mod performance_age;
pub mod phenoage;
pub mod physical;
pub mod severity;
pub mod text;
pub mod toxins;
pub mod wellness;

use serde::{Deserialize, Serialize};

/// Raised for mandatory inputs that are unusable, never for absent optional
/// ones. Absence degrades a computation per-factor instead of failing it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ScoringError {
    pub(crate) fn not_positive(field: &'static str, value: f64) -> Self {
        Self::InvalidInput {
            field,
            reason: format!("must be strictly positive, got {value}"),
        }
    }

    pub(crate) fn unknown_vocabulary(field: &'static str, value: &str) -> Self {
        Self::InvalidInput {
            field,
            reason: format!("unrecognized value '{value}'"),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Discrete contribution of one weighted factor to a composite age,
/// allowing the final number to be rebuilt from its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution<K> {
    pub factor: K,
    /// Signed percent-of-chronological-age adjustment, e.g. -0.15 for -15%.
    pub percent_of_age: f64,
    pub contribution_years: f64,
    pub notes: String,
}

impl<K> FactorContribution<K> {
    pub(crate) fn new(factor: K, percent_of_age: f64, age: f64, notes: String) -> Self {
        Self {
            factor,
            percent_of_age,
            contribution_years: percent_of_age * age,
            notes,
        }
    }
}

/// Baseline risk tier, ordered least to most severe. Independent derivations
/// combine by taking the maximum, never by source precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Mild,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Mild => "Mild",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::not_positive(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_categories_order_by_severity() {
        assert!(RiskCategory::High > RiskCategory::Moderate);
        assert!(RiskCategory::Moderate > RiskCategory::Mild);
        assert!(RiskCategory::Mild > RiskCategory::Low);
        assert_eq!(
            RiskCategory::Low.max(RiskCategory::Moderate),
            RiskCategory::Moderate
        );
    }

    #[test]
    fn require_positive_names_the_field() {
        let err = require_positive("albumin", 0.0).expect_err("zero rejected");
        assert_eq!(err.field(), "albumin");
        assert!(require_positive("albumin", f64::NAN).is_err());
    }
}
