//! Legacy single-ladder cardiology categorization. Grades every available
//! signal onto the severity scale, takes the worst, and maps it straight to
//! the 4-bucket category. Kept for reports generated before the two-stage
//! model shipped.

use super::{CardiologyInputs, CardiologyResult, LegacyRiskCategory};
use crate::scoring::severity::{parse_qualitative, parse_severity, QualitativeLevel, Severity};

fn cac_severity(score: f64) -> Severity {
    if score <= 0.0 {
        Severity::None
    } else if score < 100.0 {
        Severity::Mild
    } else if score < 400.0 {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

fn stenosis_severity(pct: f64) -> Severity {
    if pct <= 0.0 {
        Severity::None
    } else if pct < 50.0 {
        Severity::Mild
    } else if pct < 70.0 {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

fn ef_severity(ef: f64) -> Severity {
    if ef >= 55.0 {
        Severity::None
    } else if ef >= 45.0 {
        Severity::Mild
    } else if ef >= 35.0 {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

// The v1 ladder accepted qualitative low/moderate/high wording and graded a
// "low" impression as mild; v3.2 deliberately does not.
fn qualitative_severity(text: &str) -> Severity {
    match parse_qualitative(text) {
        Some(QualitativeLevel::Low) => Severity::Mild,
        Some(QualitativeLevel::Moderate) => Severity::Moderate,
        Some(QualitativeLevel::High) | Some(QualitativeLevel::Severe) => Severity::Severe,
        None => parse_severity(text),
    }
}

fn category_for(severity: Severity) -> LegacyRiskCategory {
    match severity {
        Severity::Unknown | Severity::None => LegacyRiskCategory::Low,
        Severity::Mild => LegacyRiskCategory::Mild,
        Severity::Moderate => LegacyRiskCategory::Moderate,
        Severity::Severe => LegacyRiskCategory::Severe,
    }
}

pub(super) fn evaluate(inputs: &CardiologyInputs) -> CardiologyResult {
    if inputs.ascvd_history == Some(true) {
        return CardiologyResult {
            legacy_category: LegacyRiskCategory::Severe,
            explanation: "Clinical ASCVD history on record; category is SEVERE regardless of \
                          imaging and physiology findings."
                .to_string(),
            two_stage: None,
        };
    }

    let mut worst = Severity::Unknown;
    let mut reasons: Vec<String> = Vec::new();

    if let Some(score) = inputs.cac_score {
        let severity = cac_severity(score);
        worst = worst.max(severity);
        reasons.push(format!("CAC {score:.0} graded {}", severity.label()));
    }
    if let Some(pct) = inputs.cta_max_stenosis_pct {
        let severity = stenosis_severity(pct);
        worst = worst.max(severity);
        reasons.push(format!("CTA stenosis {pct:.0}% graded {}", severity.label()));
    }
    if let Some(text) = inputs.cta_qualitative.as_deref() {
        let severity = qualitative_severity(text);
        if severity > Severity::Unknown {
            worst = worst.max(severity);
            reasons.push(format!("CTA impression '{text}' graded {}", severity.label()));
        }
    }
    if let Some(text) = inputs.plaque_imaging.as_deref() {
        let severity = qualitative_severity(text);
        if severity > Severity::Unknown {
            worst = worst.max(severity);
            reasons.push(format!("plaque imaging '{text}' graded {}", severity.label()));
        }
    }
    if let Some(ef) = inputs.ejection_fraction {
        let severity = ef_severity(ef);
        worst = worst.max(severity);
        reasons.push(format!("EF {ef:.0}% graded {}", severity.label()));
    }

    let legacy_category = category_for(worst);
    let explanation = if reasons.is_empty() {
        format!(
            "No cardiac signals available; category defaults to {}.",
            legacy_category.label()
        )
    } else {
        format!(
            "Worst available signal grades {}; category {}. Signals: {}.",
            worst.label(),
            legacy_category.label(),
            reasons.join("; ")
        )
    };

    CardiologyResult {
        legacy_category,
        explanation,
        two_stage: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_signal_wins_the_ladder() {
        let inputs = CardiologyInputs {
            cac_score: Some(50.0),
            cta_max_stenosis_pct: Some(72.0),
            ejection_fraction: Some(60.0),
            ..CardiologyInputs::default()
        };
        let result = evaluate(&inputs);
        assert_eq!(result.legacy_category, LegacyRiskCategory::Severe);
    }

    #[test]
    fn qualitative_low_grades_mild_in_the_legacy_ladder() {
        let inputs = CardiologyInputs {
            cta_qualitative: Some("low".to_string()),
            ..CardiologyInputs::default()
        };
        let result = evaluate(&inputs);
        assert_eq!(result.legacy_category, LegacyRiskCategory::Mild);
    }

    #[test]
    fn no_signals_defaults_low() {
        let result = evaluate(&CardiologyInputs::default());
        assert_eq!(result.legacy_category, LegacyRiskCategory::Low);
        assert!(result.explanation.contains("No cardiac signals"));
    }
}
