//! BrainHealth: nine weighted domains summing to a 0-100 composite. The
//! cognitive percentile carries the largest weight and additionally drives
//! the `confirm_evaluate` flag, which is independent of the level: a single
//! low assessment and a sharp decline are distinct clinical triggers and
//! both must surface.

use super::{
    band_points, detect_trend, min_max_normalize, perceived_stress_points, promis_symptom_points,
    DomainContribution, PriorAssessment, Trend, WellnessLevel,
};
use crate::scoring::severity::clamp_percentile;
use serde::{Deserialize, Serialize};

const W_COGNITIVE: f64 = 0.30;
const W_DEPRESSION: f64 = 0.12;
const W_ANXIETY: f64 = 0.10;
const W_STRESS: f64 = 0.10;
const W_SLEEP: f64 = 0.10;
const W_RESILIENCE: f64 = 0.10;
const W_OPTIMISM: f64 = 0.06;
const W_MEANING: f64 = 0.06;
const W_FLOURISHING: f64 = 0.06;

const COGNITIVE_LOW_PERCENTILE: f64 = 20.0;
const COGNITIVE_DROP_POINTS: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainHealthInputs {
    pub cognitive_percentile: Option<f64>,
    pub prior_cognitive_percentile: Option<f64>,
    /// PROMIS T-scores (mean 50, SD 10); higher is worse.
    pub promis_depression_t: Option<f64>,
    pub promis_anxiety_t: Option<f64>,
    pub promis_sleep_t: Option<f64>,
    /// PSS-10, 0-40.
    pub perceived_stress: Option<f64>,
    /// BRS mean item score, 1-5.
    pub resilience: Option<f64>,
    /// LOT-R total, 0-24.
    pub optimism: Option<f64>,
    /// MLQ presence subscale, 5-35.
    pub meaning: Option<f64>,
    /// Flourishing Scale total, 8-56.
    pub flourishing: Option<f64>,
    pub prior: Option<PriorAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrainHealthResult {
    pub score: f64,
    pub level: WellnessLevel,
    pub trend: Trend,
    /// Fires on a low cognitive percentile or a >=20-point drop from prior,
    /// independent of the level.
    pub confirm_evaluate: bool,
    pub domains: Vec<DomainContribution>,
}

fn normalized_domain(
    domain: &'static str,
    raw: Option<f64>,
    min: f64,
    max: f64,
    weight: f64,
) -> DomainContribution {
    match raw {
        Some(value) => {
            let normalized = min_max_normalize(value, min, max);
            let points = band_points(normalized);
            DomainContribution::measured(
                domain,
                value,
                points,
                weight,
                format!("{domain} {value:.1} normalized to {normalized:.0}/100"),
            )
        }
        None => DomainContribution::defaulted(domain, 100.0, weight),
    }
}

fn promis_domain(domain: &'static str, raw: Option<f64>, weight: f64) -> DomainContribution {
    match raw {
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
    }
}

pub fn brain_health(inputs: &BrainHealthInputs, trend_delta: f64) -> BrainHealthResult {
    let mut domains = Vec::with_capacity(9);

    let cognitive = match inputs.cognitive_percentile {
        Some(percentile) => {
            let clamped = clamp_percentile(percentile, 1.0, 99.0);
            DomainContribution::measured(
                "cognitive",
                percentile,
                clamped,
                W_COGNITIVE,
                format!("cognitive percentile {clamped:.0} (clamped to 1-99)"),
            )
        }
        None => DomainContribution::defaulted("cognitive", 99.0, W_COGNITIVE),
    };
    domains.push(cognitive);

    domains.push(promis_domain(
        "depression",
        inputs.promis_depression_t,
        W_DEPRESSION,
    ));
    domains.push(promis_domain("anxiety", inputs.promis_anxiety_t, W_ANXIETY));

    let stress = match inputs.perceived_stress {
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
    };
    domains.push(stress);

    domains.push(promis_domain("sleep", inputs.promis_sleep_t, W_SLEEP));
    domains.push(normalized_domain(
        "resilience",
        inputs.resilience,
        1.0,
        5.0,
        W_RESILIENCE,
    ));
    domains.push(normalized_domain(
        "optimism",
        inputs.optimism,
        0.0,
        24.0,
        W_OPTIMISM,
    ));
    domains.push(normalized_domain(
        "meaning",
        inputs.meaning,
        5.0,
        35.0,
        W_MEANING,
    ));
    domains.push(normalized_domain(
        "flourishing",
        inputs.flourishing,
        8.0,
        56.0,
        W_FLOURISHING,
    ));

    let score: f64 = domains.iter().map(|d| d.weighted_points).sum();

    let single_low = inputs
        .cognitive_percentile
        .map(|p| p < COGNITIVE_LOW_PERCENTILE)
        .unwrap_or(false);
    let sharp_decline = match (inputs.prior_cognitive_percentile, inputs.cognitive_percentile) {
        (Some(prior), Some(current)) => prior - current >= COGNITIVE_DROP_POINTS,
        _ => false,
    };

    BrainHealthResult {
        score,
        level: WellnessLevel::from_score(score),
        trend: detect_trend(score, inputs.prior.as_ref().map(|p| p.score), trend_delta),
        confirm_evaluate: single_low || sharp_decline,
        domains,
    }
}
