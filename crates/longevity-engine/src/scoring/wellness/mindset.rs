//! LongevityMindset: outlook-oriented sibling of BrainHealth. Four domains,
//! same banding and trend rules.

use super::{
    band_points, detect_trend, min_max_normalize, DomainContribution, PriorAssessment, Trend,
    WellnessLevel,
};
use serde::{Deserialize, Serialize};

const W_OPTIMISM: f64 = 0.30;
const W_MEANING: f64 = 0.25;
const W_SELF_EFFICACY: f64 = 0.25;
const W_FLOURISHING: f64 = 0.20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongevityMindsetInputs {
    /// LOT-R total, 0-24.
    pub optimism: Option<f64>,
    /// MLQ presence subscale, 5-35.
    pub meaning: Option<f64>,
    /// Self-rated confidence in managing one's health, 0-100.
    pub health_self_efficacy: Option<f64>,
    /// Flourishing Scale total, 8-56.
    pub flourishing: Option<f64>,
    pub prior: Option<PriorAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongevityMindsetResult {
    pub score: f64,
    pub level: WellnessLevel,
    pub trend: Trend,
    pub domains: Vec<DomainContribution>,
}

fn scaled_domain(
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

pub fn longevity_mindset(inputs: &LongevityMindsetInputs, trend_delta: f64) -> LongevityMindsetResult {
    let domains = vec![
        scaled_domain("optimism", inputs.optimism, 0.0, 24.0, W_OPTIMISM),
        scaled_domain("meaning", inputs.meaning, 5.0, 35.0, W_MEANING),
        scaled_domain(
            "self-efficacy",
            inputs.health_self_efficacy,
            0.0,
            100.0,
            W_SELF_EFFICACY,
        ),
        scaled_domain("flourishing", inputs.flourishing, 8.0, 56.0, W_FLOURISHING),
    ];

    let score: f64 = domains.iter().map(|d| d.weighted_points).sum();

    LongevityMindsetResult {
        score,
        level: WellnessLevel::from_score(score),
        trend: detect_trend(score, inputs.prior.as_ref().map(|p| p.score), trend_delta),
        domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_outlook_scores_drop_below_the_healthy_threshold() {
        let inputs = LongevityMindsetInputs {
            optimism: Some(6.0),
            meaning: Some(10.0),
            health_self_efficacy: Some(30.0),
            flourishing: Some(20.0),
            ..LongevityMindsetInputs::default()
        };
        let result = longevity_mindset(&inputs, 1.0);
        assert_eq!(result.level, WellnessLevel::NeedsAttention);
        assert_eq!(result.domains.len(), 4);
    }

    #[test]
    fn trend_reads_improving_past_the_delta() {
        let inputs = LongevityMindsetInputs {
            optimism: Some(22.0),
            meaning: Some(32.0),
            health_self_efficacy: Some(90.0),
            flourishing: Some(52.0),
            prior: Some(PriorAssessment {
                score: 80.0,
                assessed_on: None,
            }),
        };
        let result = longevity_mindset(&inputs, 1.0);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.trend, Trend::Improving);
    }
}
