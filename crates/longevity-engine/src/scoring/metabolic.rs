//! Metabolic classification and consistency enforcement. The category
//! derivation here is the single source of truth: any category proposed by
//! an external producer (typically the narrative model) is recomputed from
//! counts and flags and overridden on disagreement, with an audit note.

use super::ScoringError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(ScoringError::unknown_vocabulary("sex", value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetabolicInputs {
    pub chronological_age: Option<f64>,
    /// mg/dL
    pub triglycerides: Option<f64>,
    /// mg/dL
    pub hdl: Option<f64>,
    /// mg/dL, fasting
    pub glucose: Option<f64>,
    /// µIU/mL, fasting
    pub insulin: Option<f64>,
    /// percent
    pub a1c: Option<f64>,
    /// U/L
    pub ast: Option<f64>,
    /// U/L
    pub alt: Option<f64>,
    /// 1000/µL
    pub platelets: Option<f64>,
    pub visceral_fat_percentile: Option<f64>,
    pub lean_to_fat_ratio: Option<f64>,
    /// Required only when a lean-to-fat ratio is supplied.
    pub sex: Option<String>,
    /// Category proposed by an external producer, if any. Never trusted.
    pub external_category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGrade {
    Optimal,
    Mild,
    Moderate,
    Severe,
    Unknown,
}

impl MetricGrade {
    fn non_optimal(self) -> bool {
        matches!(self, Self::Mild | Self::Moderate | Self::Severe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicCategory {
    OptimalMetabolism,
    MildMetabolicDysfunction,
    MetabolicDysfunction,
}

impl MetabolicCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::OptimalMetabolism => "Optimal Metabolism",
            Self::MildMetabolicDysfunction => "Mild Metabolic Dysfunction",
            Self::MetabolicDysfunction => "Metabolic Dysfunction",
        }
    }

    fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "optimal metabolism" => Some(Self::OptimalMetabolism),
            "mild metabolic dysfunction" => Some(Self::MildMetabolicDysfunction),
            "metabolic dysfunction" => Some(Self::MetabolicDysfunction),
            _ => None,
        }
    }
}

/// Per-metric grades; Unknown marks metrics whose inputs were absent, which
/// never count toward dysfunction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGrades {
    pub tg_hdl_ratio: MetricGrade,
    pub homa_ir: MetricGrade,
    pub fib4: MetricGrade,
    pub a1c: MetricGrade,
    pub fasting_insulin: MetricGrade,
    pub visceral_fat: MetricGrade,
    pub lean_to_fat: MetricGrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub mild: u8,
    pub moderate: u8,
    pub severe: u8,
    pub non_optimal: u8,
    /// Only A1c is non-optimal.
    pub isolated_a1c_elevation: bool,
    /// Only fasting insulin and/or HOMA-IR are non-optimal.
    pub isolated_insulin_resistance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicResult {
    pub tg_hdl_ratio: Option<f64>,
    pub homa_ir: Option<f64>,
    pub fib4: Option<f64>,
    pub grades: MetricGrades,
    pub counts: GradeCounts,
    pub category: MetabolicCategory,
    /// Records a corrected external category; None when none was proposed or
    /// it already agreed.
    pub audit_note: Option<String>,
}

fn grade(value: Option<f64>, mild: f64, moderate: f64, severe: f64) -> MetricGrade {
    match value {
        None => MetricGrade::Unknown,
        Some(v) if v < mild => MetricGrade::Optimal,
        Some(v) if v < moderate => MetricGrade::Mild,
        Some(v) if v < severe => MetricGrade::Moderate,
        Some(_) => MetricGrade::Severe,
    }
}

/// Thresholds run downward: a higher ratio is better.
fn grade_lean_to_fat(value: f64, sex: Sex) -> MetricGrade {
    let (optimal, mild, moderate) = match sex {
        Sex::Male => (3.0, 2.5, 2.0),
        Sex::Female => (2.5, 2.0, 1.5),
    };
    if value >= optimal {
        MetricGrade::Optimal
    } else if value >= mild {
        MetricGrade::Mild
    } else if value >= moderate {
        MetricGrade::Moderate
    } else {
        MetricGrade::Severe
    }
}

fn grade_visceral_fat(percentile: f64) -> MetricGrade {
    if percentile <= 50.0 {
        MetricGrade::Optimal
    } else if percentile <= 75.0 {
        MetricGrade::Mild
    } else if percentile <= 90.0 {
        MetricGrade::Moderate
    } else {
        MetricGrade::Severe
    }
}

pub fn derive_counts(grades: &MetricGrades) -> GradeCounts {
    let all = [
        grades.tg_hdl_ratio,
        grades.homa_ir,
        grades.fib4,
        grades.a1c,
        grades.fasting_insulin,
        grades.visceral_fat,
        grades.lean_to_fat,
    ];

    let mut counts = GradeCounts {
        mild: 0,
        moderate: 0,
        severe: 0,
        non_optimal: 0,
        isolated_a1c_elevation: false,
        isolated_insulin_resistance: false,
    };
    for grade in all {
        match grade {
            MetricGrade::Mild => counts.mild += 1,
            MetricGrade::Moderate => counts.moderate += 1,
            MetricGrade::Severe => counts.severe += 1,
            MetricGrade::Optimal | MetricGrade::Unknown => {}
        }
    }
    counts.non_optimal = counts.mild + counts.moderate + counts.severe;

    counts.isolated_a1c_elevation = grades.a1c.non_optimal()
        && counts.non_optimal == 1;

    let resistance_markers = u8::from(grades.fasting_insulin.non_optimal())
        + u8::from(grades.homa_ir.non_optimal());
    counts.isolated_insulin_resistance =
        resistance_markers > 0 && counts.non_optimal == resistance_markers;

    counts
}

/// The category derivation function. Pure, total, and the only place a
/// metabolic category may come from.
pub fn category_from_counts(counts: &GradeCounts) -> MetabolicCategory {
    if counts.non_optimal == 0 || counts.isolated_a1c_elevation {
        MetabolicCategory::OptimalMetabolism
    } else if counts.non_optimal < 3 && counts.moderate == 0 && counts.severe == 0 {
        MetabolicCategory::MildMetabolicDysfunction
    } else {
        MetabolicCategory::MetabolicDysfunction
    }
}

/// Recompute the category and override an untrusted candidate on
/// disagreement. The correction is recorded, never silent.
pub fn enforce_category(
    external: Option<&str>,
    counts: &GradeCounts,
) -> (MetabolicCategory, Option<String>) {
    let authoritative = category_from_counts(counts);
    match external {
        None => (authoritative, None),
        Some(candidate) => {
            let agrees = MetabolicCategory::from_label(candidate)
                .map(|parsed| parsed == authoritative)
                .unwrap_or(false);
            if agrees {
                (authoritative, None)
            } else {
                warn!(
                    candidate,
                    authoritative = authoritative.label(),
                    "overriding externally supplied metabolic category"
                );
                (
                    authoritative,
                    Some(format!(
                        "externally supplied category '{candidate}' overridden to '{}' \
                         (recomputed from metric grades)",
                        authoritative.label()
                    )),
                )
            }
        }
    }
}

pub fn classify(inputs: &MetabolicInputs) -> Result<MetabolicResult, ScoringError> {
    let tg_hdl_ratio = match (inputs.triglycerides, inputs.hdl) {
        (Some(tg), Some(hdl)) if hdl > 0.0 => Some(tg / hdl),
        _ => None,
    };
    let homa_ir = match (inputs.glucose, inputs.insulin) {
        (Some(glucose), Some(insulin)) => Some(glucose * insulin / 405.0),
        _ => None,
    };
    let fib4 = match (
        inputs.chronological_age,
        inputs.ast,
        inputs.alt,
        inputs.platelets,
    ) {
        (Some(age), Some(ast), Some(alt), Some(platelets)) if alt > 0.0 && platelets > 0.0 => {
            Some(age * ast / (platelets * alt.sqrt()))
        }
        _ => None,
    };

    let lean_to_fat = match inputs.lean_to_fat_ratio {
        Some(ratio) => {
            let sex_text = inputs.sex.as_deref().ok_or(ScoringError::InvalidInput {
                field: "sex",
                reason: "required to grade the lean-to-fat ratio".to_string(),
            })?;
            let sex = Sex::parse(sex_text)?;
            grade_lean_to_fat(ratio, sex)
        }
        None => MetricGrade::Unknown,
    };

    let grades = MetricGrades {
        tg_hdl_ratio: grade(tg_hdl_ratio, 1.5, 3.0, 4.0),
        homa_ir: grade(homa_ir, 2.0, 2.9, 5.0),
        fib4: grade(fib4, 1.3, 2.0, 2.67),
        a1c: grade(inputs.a1c, 5.7, 6.0, 6.5),
        fasting_insulin: grade(inputs.insulin, 10.0, 15.0, 25.0),
        visceral_fat: inputs
            .visceral_fat_percentile
            .map(grade_visceral_fat)
            .unwrap_or(MetricGrade::Unknown),
        lean_to_fat,
    };

    let counts = derive_counts(&grades);
    let (category, audit_note) = enforce_category(inputs.external_category.as_deref(), &counts);

    Ok(MetabolicResult {
        tg_hdl_ratio,
        homa_ir,
        fib4,
        grades,
        counts,
        category,
        audit_note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimal_grades() -> MetricGrades {
        MetricGrades {
            tg_hdl_ratio: MetricGrade::Optimal,
            homa_ir: MetricGrade::Optimal,
            fib4: MetricGrade::Optimal,
            a1c: MetricGrade::Optimal,
            fasting_insulin: MetricGrade::Optimal,
            visceral_fat: MetricGrade::Optimal,
            lean_to_fat: MetricGrade::Optimal,
        }
    }

    #[test]
    fn no_findings_is_optimal_metabolism() {
        let counts = derive_counts(&optimal_grades());
        assert_eq!(counts.non_optimal, 0);
        assert_eq!(
            category_from_counts(&counts),
            MetabolicCategory::OptimalMetabolism
        );
    }

    #[test]
    fn isolated_a1c_elevation_stays_optimal() {
        let mut grades = optimal_grades();
        grades.a1c = MetricGrade::Mild;
        let counts = derive_counts(&grades);
        assert!(counts.isolated_a1c_elevation);
        assert_eq!(
            category_from_counts(&counts),
            MetabolicCategory::OptimalMetabolism
        );
    }

    #[test]
    fn two_mild_findings_grade_mild_dysfunction() {
        let mut grades = optimal_grades();
        grades.tg_hdl_ratio = MetricGrade::Mild;
        grades.visceral_fat = MetricGrade::Mild;
        let counts = derive_counts(&grades);
        assert_eq!(
            category_from_counts(&counts),
            MetabolicCategory::MildMetabolicDysfunction
        );
    }

    #[test]
    fn any_moderate_finding_grades_full_dysfunction() {
        let mut grades = optimal_grades();
        grades.homa_ir = MetricGrade::Moderate;
        let counts = derive_counts(&grades);
        assert_eq!(
            category_from_counts(&counts),
            MetabolicCategory::MetabolicDysfunction
        );
    }

    #[test]
    fn isolated_insulin_resistance_flags_both_markers() {
        let mut grades = optimal_grades();
        grades.fasting_insulin = MetricGrade::Mild;
        grades.homa_ir = MetricGrade::Mild;
        let counts = derive_counts(&grades);
        assert!(counts.isolated_insulin_resistance);
        assert!(!counts.isolated_a1c_elevation);
    }

    #[test]
    fn category_derivation_is_idempotent_over_its_own_output() {
        let mut grades = optimal_grades();
        grades.tg_hdl_ratio = MetricGrade::Mild;
        let counts = derive_counts(&grades);
        let first = category_from_counts(&counts);
        // Re-deriving from the same counts reproduces the category.
        assert_eq!(category_from_counts(&counts), first);
    }

    #[test]
    fn disagreeing_external_category_is_overridden_with_audit() {
        let counts = derive_counts(&optimal_grades());
        let (category, note) = enforce_category(Some("Metabolic Dysfunction"), &counts);
        assert_eq!(category, MetabolicCategory::OptimalMetabolism);
        let note = note.expect("audit note recorded");
        assert!(note.contains("overridden"));
    }

    #[test]
    fn agreeing_external_category_needs_no_audit() {
        let counts = derive_counts(&optimal_grades());
        let (category, note) = enforce_category(Some("Optimal Metabolism"), &counts);
        assert_eq!(category, MetabolicCategory::OptimalMetabolism);
        assert!(note.is_none());
    }

    #[test]
    fn derived_metrics_require_complete_raw_pairs() {
        let inputs = MetabolicInputs {
            glucose: Some(90.0),
            ..MetabolicInputs::default()
        };
        let result = classify(&inputs).expect("classifies");
        assert_eq!(result.homa_ir, None);
        assert_eq!(result.grades.homa_ir, MetricGrade::Unknown);
        assert_eq!(result.category, MetabolicCategory::OptimalMetabolism);
    }

    #[test]
    fn homa_ir_uses_the_405_denominator() {
        let inputs = MetabolicInputs {
            glucose: Some(90.0),
            insulin: Some(9.0),
            ..MetabolicInputs::default()
        };
        let result = classify(&inputs).expect("classifies");
        assert!((result.homa_ir.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(result.grades.homa_ir, MetricGrade::Mild);
    }

    #[test]
    fn lean_to_fat_needs_a_recognized_sex() {
        let inputs = MetabolicInputs {
            lean_to_fat_ratio: Some(2.8),
            sex: Some("other".to_string()),
            ..MetabolicInputs::default()
        };
        let err = classify(&inputs).expect_err("controlled vocabulary");
        assert_eq!(err.field(), "sex");
    }

    #[test]
    fn lean_to_fat_thresholds_split_by_sex() {
        assert_eq!(grade_lean_to_fat(2.8, Sex::Male), MetricGrade::Mild);
        assert_eq!(grade_lean_to_fat(2.8, Sex::Female), MetricGrade::Optimal);
    }
}
