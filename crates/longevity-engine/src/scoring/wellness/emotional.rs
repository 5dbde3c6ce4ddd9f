//! MentallyEmotionallyWell: symptom-oriented sibling of BrainHealth built
//! from the PROMIS scales plus stress, resilience, and flourishing.

use super::{
    band_points, detect_trend, min_max_normalize, perceived_stress_points, promis_symptom_points,
    DomainContribution, PriorAssessment, Trend, WellnessLevel,
};
use serde::{Deserialize, Serialize};

const W_DEPRESSION: f64 = 0.25;
const W_ANXIETY: f64 = 0.25;
const W_STRESS: f64 = 0.20;
const W_RESILIENCE: f64 = 0.15;
const W_FLOURISHING: f64 = 0.15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentallyEmotionallyWellInputs {
    pub promis_depression_t: Option<f64>,
    pub promis_anxiety_t: Option<f64>,
    /// PSS-10, 0-40.
    pub perceived_stress: Option<f64>,
    /// BRS mean item score, 1-5.
    pub resilience: Option<f64>,
    /// Flourishing Scale total, 8-56.
    pub flourishing: Option<f64>,
    pub prior: Option<PriorAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentallyEmotionallyWellResult {
    pub score: f64,
    pub level: WellnessLevel,
    pub trend: Trend,
    pub domains: Vec<DomainContribution>,
}

pub fn mentally_emotionally_well(
    inputs: &MentallyEmotionallyWellInputs,
    trend_delta: f64,
) -> MentallyEmotionallyWellResult {
    let mut domains = Vec::with_capacity(5);

    for (domain, raw, weight) in [
        ("depression", inputs.promis_depression_t, W_DEPRESSION),
        ("anxiety", inputs.promis_anxiety_t, W_ANXIETY),
    ] {
        domains.push(match raw {
            Some(t_score) => {
                let (points, phrase) = promis_symptom_points(t_score);
                DomainContribution::measured(
                    domain,
                    t_score,
                    points,
                    weight,
                    format!("{domain} T {t_score:.0}: {phrase}"),
                )
            }
            None => DomainContribution::defaulted(domain, 100.0, weight),
        });
    }

    domains.push(match inputs.perceived_stress {
        Some(score) => {
            let (points, phrase) = perceived_stress_points(score);
            DomainContribution::measured(
                "stress",
                score,
                points,
                W_STRESS,
                format!("perceived stress {score:.0}: {phrase}"),
            )
        }
        None => DomainContribution::defaulted("stress", 100.0, W_STRESS),
    });

    domains.push(match inputs.resilience {
        Some(value) => {
            let normalized = min_max_normalize(value, 1.0, 5.0);
            DomainContribution::measured(
                "resilience",
                value,
                band_points(normalized),
                W_RESILIENCE,
                format!("resilience {value:.1} normalized to {normalized:.0}/100"),
            )
        }
        None => DomainContribution::defaulted("resilience", 100.0, W_RESILIENCE),
    });

    domains.push(match inputs.flourishing {
        Some(value) => {
            let normalized = min_max_normalize(value, 8.0, 56.0);
            DomainContribution::measured(
                "flourishing",
                value,
                band_points(normalized),
                W_FLOURISHING,
                format!("flourishing {value:.1} normalized to {normalized:.0}/100"),
            )
        }
        None => DomainContribution::defaulted("flourishing", 100.0, W_FLOURISHING),
    });

    let score: f64 = domains.iter().map(|d| d.weighted_points).sum();

    MentallyEmotionallyWellResult {
        score,
        level: WellnessLevel::from_score(score),
        trend: detect_trend(score, inputs.prior.as_ref().map(|p| p.score), trend_delta),
        domains,
    }
}
