//! Two-stage v3.2 cardiology model: a plaque score and a physiology score
//! combine into a 0-30 baseline, the baseline category is raised to the
//! most severe of three independent derivations, and an optional modifiable
//! overlay completes the 0-100 heart-health score.

use super::{CardiologyInputs, CardiologyResult, LegacyRiskCategory};
use crate::scoring::severity::{parse_severity, Severity};
use crate::scoring::RiskCategory;
use serde::{Deserialize, Serialize};

const PLAQUE_NONE: u8 = 18;
const PLAQUE_ANY: u8 = 12;
const PLAQUE_MODERATE: u8 = 6;

const CAC_MODERATE: f64 = 100.0;
const CAC_PERCENTILE_MODERATE: f64 = 75.0;
const STENOSIS_MODERATE: f64 = 50.0;

const MODIFIABLE_MAX: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysiologyDetail {
    pub ejection_fraction_points: u8,
    pub structural_points: u8,
    pub treadmill_points: u8,
    pub ecg_points: u8,
    pub score: u8,
    /// "Unknown — insufficient inputs" when every sub-input was absent, so
    /// pure defaulting never implies a clean bill of health.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoStageDetail {
    pub plaque_score: u8,
    pub plaque_reasons: Vec<String>,
    pub physiology: PhysiologyDetail,
    /// plaque + physiology, 0-30.
    pub baseline_score: u8,
    pub score_category: RiskCategory,
    pub plaque_minimum: RiskCategory,
    pub ef_minimum: RiskCategory,
    /// max(score_category, plaque_minimum, ef_minimum); never lowered.
    pub baseline_category: RiskCategory,
    pub modifiable_score: Option<f64>,
    /// clamp(baseline + modifiable, 0, 100).
    pub heart_health_score: f64,
    /// True when no modifiable overlay was supplied.
    pub partial: bool,
}

struct PlaqueEvidence {
    any: bool,
    moderate_or_greater: bool,
    reasons: Vec<String>,
}

/// Two independent predicates over the union of whatever signals exist.
/// Missing signals contribute nothing to either predicate.
fn plaque_evidence(inputs: &CardiologyInputs) -> PlaqueEvidence {
    let mut any = false;
    let mut moderate = false;
    let mut reasons = Vec::new();

    if let Some(score) = inputs.cac_score {
        if score > 0.0 {
            any = true;
            reasons.push(format!("CAC score {score:.0}"));
        }
        if score >= CAC_MODERATE {
            moderate = true;
        }
    }
    if let Some(percentile) = inputs.cac_percentile {
        if percentile >= CAC_PERCENTILE_MODERATE {
            any = true;
            moderate = true;
            reasons.push(format!("CAC percentile {percentile:.0}"));
        }
    }
    if let Some(pct) = inputs.cta_max_stenosis_pct {
        if pct > 0.0 {
            any = true;
            reasons.push(format!("CTA stenosis {pct:.0}%"));
        }
        if pct >= STENOSIS_MODERATE {
            moderate = true;
        }
    }
    for (label, text) in [
        ("CTA impression", inputs.cta_qualitative.as_deref()),
        ("plaque imaging", inputs.plaque_imaging.as_deref()),
    ] {
        if let Some(text) = text {
            let severity = parse_severity(text);
            if severity >= Severity::Mild {
                any = true;
                reasons.push(format!("{label} '{text}'"));
            }
            if severity >= Severity::Moderate {
                moderate = true;
            }
        }
    }

    PlaqueEvidence {
        any,
        moderate_or_greater: moderate,
        reasons,
    }
}

fn plaque_score(evidence: &PlaqueEvidence) -> u8 {
    if evidence.moderate_or_greater {
        PLAQUE_MODERATE
    } else if evidence.any {
        PLAQUE_ANY
    } else {
        PLAQUE_NONE
    }
}

fn ef_points(ef: f64) -> u8 {
    if ef >= 55.0 {
        3
    } else if ef >= 45.0 {
        2
    } else if ef >= 35.0 {
        1
    } else {
        0
    }
}

fn severity_points(severity: Severity) -> u8 {
    match severity {
        // Unparseable wording scores like an absent input.
        Severity::Unknown | Severity::None => 3,
        Severity::Mild => 2,
        Severity::Moderate => 1,
        Severity::Severe => 0,
    }
}

fn treadmill_points(duke: f64) -> u8 {
    if duke >= 5.0 {
        3
    } else if duke >= -10.0 {
        1
    } else {
        0
    }
}

fn physiology(inputs: &CardiologyInputs) -> PhysiologyDetail {
    let ef = inputs.ejection_fraction;
    let structural = inputs.structural_abnormality.as_deref();
    let duke = inputs.duke_treadmill_score;
    let ecg = inputs.ecg_finding.as_deref();

    // Each sub-score defaults to its normal-equivalent when absent.
    let ejection_fraction_points = ef.map(ef_points).unwrap_or(3);
    let structural_points = structural
        .map(|text| severity_points(parse_severity(text)))
        .unwrap_or(3);
    let treadmill = duke.map(treadmill_points).unwrap_or(3);
    let ecg_points = ecg
        .map(|text| severity_points(parse_severity(text)))
        .unwrap_or(3);

    let score = ejection_fraction_points + structural_points + treadmill + ecg_points;

    let all_absent = ef.is_none() && structural.is_none() && duke.is_none() && ecg.is_none();
    let status = if all_absent {
        "Unknown — insufficient inputs".to_string()
    } else if score >= 11 {
        "Normal".to_string()
    } else if score >= 8 {
        "Mildly reduced".to_string()
    } else if score >= 4 {
        "Moderately reduced".to_string()
    } else {
        "Severely reduced".to_string()
    };

    PhysiologyDetail {
        ejection_fraction_points,
        structural_points,
        treadmill_points: treadmill,
        ecg_points,
        score,
        status,
    }
}

fn score_category(baseline: u8) -> RiskCategory {
    if baseline >= 26 {
        RiskCategory::Low
    } else if baseline >= 20 {
        RiskCategory::Mild
    } else if baseline >= 14 {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

fn plaque_minimum(evidence: &PlaqueEvidence) -> RiskCategory {
    if evidence.moderate_or_greater {
        RiskCategory::Moderate
    } else if evidence.any {
        RiskCategory::Mild
    } else {
        RiskCategory::Low
    }
}

fn ef_minimum(ef: Option<f64>) -> RiskCategory {
    match ef {
        Some(value) if value < 35.0 => RiskCategory::High,
        Some(value) if value < 50.0 => RiskCategory::Moderate,
        _ => RiskCategory::Low,
    }
}

fn legacy_for(category: RiskCategory) -> LegacyRiskCategory {
    match category {
        RiskCategory::Low => LegacyRiskCategory::Low,
        RiskCategory::Mild => LegacyRiskCategory::Mild,
        RiskCategory::Moderate => LegacyRiskCategory::Moderate,
        RiskCategory::High => LegacyRiskCategory::Severe,
    }
}

fn explanation(detail: &TwoStageDetail, evidence: &PlaqueEvidence, legacy: LegacyRiskCategory) -> String {
    let plaque_sentence = if evidence.reasons.is_empty() {
        "No plaque evidence among the available signals.".to_string()
    } else {
        format!(
            "Plaque evidence ({}): {}.",
            if evidence.moderate_or_greater {
                "moderate or greater"
            } else {
                "present, below moderate"
            },
            evidence.reasons.join("; ")
        )
    };

    format!(
        "{plaque_sentence} Physiology {} (score {}/12). Baseline {}/30 places the {} category; \
         raised where plaque or ejection fraction implies a minimum. Overall category {}.",
        detail.physiology.status,
        detail.physiology.score,
        detail.baseline_score,
        detail.score_category.label(),
        legacy.label()
    )
}

pub(super) fn evaluate(inputs: &CardiologyInputs) -> CardiologyResult {
    let evidence = plaque_evidence(inputs);
    let plaque = plaque_score(&evidence);
    let physiology = physiology(inputs);
    let baseline_score = plaque + physiology.score;

    let score_cat = score_category(baseline_score);
    let plaque_min = plaque_minimum(&evidence);
    let ef_min = ef_minimum(inputs.ejection_fraction);
    let baseline_category = score_cat.max(plaque_min).max(ef_min);

    let modifiable = inputs
        .modifiable_score
        .map(|value| value.clamp(0.0, MODIFIABLE_MAX));
    let heart_health_score = (f64::from(baseline_score) + modifiable.unwrap_or(0.0))
        .clamp(0.0, 100.0);

    let detail = TwoStageDetail {
        plaque_score: plaque,
        plaque_reasons: evidence.reasons.clone(),
        physiology,
        baseline_score,
        score_category: score_cat,
        plaque_minimum: plaque_min,
        ef_minimum: ef_min,
        baseline_category,
        modifiable_score: modifiable,
        heart_health_score,
        partial: modifiable.is_none(),
    };

    let legacy_category = if inputs.ascvd_history == Some(true) {
        LegacyRiskCategory::Severe
    } else {
        legacy_for(baseline_category)
    };

    let mut explanation = explanation(&detail, &evidence, legacy_category);
    if inputs.ascvd_history == Some(true) {
        explanation.push_str(" Clinical ASCVD history on record; category forced to SEVERE.");
    }

    let mut context: Vec<String> = Vec::new();
    if let Some(age) = inputs.phenotypic_age_years {
        context.push(format!("phenotypic age {age:.1}"));
    }
    if let Some(age) = inputs.health_age_years {
        context.push(format!("health age {age:.1}"));
    }
    if let Some(age) = inputs.performance_age_years {
        context.push(format!("performance age {age:.1}"));
    }
    if !context.is_empty() {
        explanation.push_str(&format!(" Assessed alongside {}.", context.join(", ")));
    }

    CardiologyResult {
        legacy_category,
        explanation,
        two_stage: Some(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_inputs_score_the_full_baseline() {
        let inputs = CardiologyInputs {
            cac_score: Some(0.0),
            ejection_fraction: Some(62.0),
            ..CardiologyInputs::default()
        };
        let result = evaluate(&inputs);
        let detail = result.two_stage.expect("two-stage detail");
        assert_eq!(detail.plaque_score, 18);
        assert_eq!(detail.physiology.score, 12);
        assert_eq!(detail.baseline_score, 30);
        assert_eq!(detail.baseline_category, RiskCategory::Low);
        assert_eq!(result.legacy_category, LegacyRiskCategory::Low);
    }

    #[test]
    fn physiology_status_reads_unknown_when_every_input_is_absent() {
        let result = evaluate(&CardiologyInputs::default());
        let detail = result.two_stage.expect("two-stage detail");
        assert_eq!(detail.physiology.score, 12);
        assert_eq!(detail.physiology.status, "Unknown — insufficient inputs");
    }

    #[test]
    fn category_is_raised_to_the_plaque_implied_minimum() {
        // Mild plaque but otherwise perfect physiology: the 30-point band
        // would say Low, the plaque presence says at least Mild.
        let inputs = CardiologyInputs {
            cac_score: Some(15.0),
            ejection_fraction: Some(60.0),
            ..CardiologyInputs::default()
        };
        let result = evaluate(&inputs);
        let detail = result.two_stage.expect("two-stage detail");
        assert_eq!(detail.baseline_score, 24);
        assert!(detail.baseline_category >= detail.plaque_minimum);
        assert_eq!(detail.baseline_category, RiskCategory::Mild);
    }

    #[test]
    fn low_ejection_fraction_implies_a_high_minimum() {
        let inputs = CardiologyInputs {
            cac_score: Some(0.0),
            ejection_fraction: Some(30.0),
            ..CardiologyInputs::default()
        };
        let result = evaluate(&inputs);
        let detail = result.two_stage.expect("two-stage detail");
        assert_eq!(detail.ef_minimum, RiskCategory::High);
        assert_eq!(detail.baseline_category, RiskCategory::High);
        assert_eq!(result.legacy_category, LegacyRiskCategory::Severe);
    }

    #[test]
    fn modifiable_overlay_is_clamped_and_absence_flags_partial() {
        let mut inputs = CardiologyInputs {
            cac_score: Some(0.0),
            ejection_fraction: Some(60.0),
            modifiable_score: Some(90.0),
            ..CardiologyInputs::default()
        };
        let detail = evaluate(&inputs).two_stage.expect("detail");
        assert_eq!(detail.modifiable_score, Some(70.0));
        assert_eq!(detail.heart_health_score, 100.0);
        assert!(!detail.partial);

        inputs.modifiable_score = None;
        let detail = evaluate(&inputs).two_stage.expect("detail");
        assert!(detail.partial);
        assert_eq!(detail.heart_health_score, 30.0);
    }

    #[test]
    fn qualitative_low_is_not_plaque_evidence_in_v32() {
        let inputs = CardiologyInputs {
            cta_qualitative: Some("low".to_string()),
            ..CardiologyInputs::default()
        };
        let detail = evaluate(&inputs).two_stage.expect("detail");
        assert_eq!(detail.plaque_score, 18);
    }
}
