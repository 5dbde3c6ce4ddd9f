use chrono::NaiveDate;
use longevity_engine::scoring::wellness::brain::{brain_health, BrainHealthInputs};
use longevity_engine::scoring::wellness::connected::{be_connected, BeConnectedInputs};
use longevity_engine::scoring::wellness::{PriorAssessment, Trend, WellnessLevel};

fn prior(score: f64) -> PriorAssessment {
    PriorAssessment {
        score,
        assessed_on: NaiveDate::from_ymd_opt(2026, 2, 10),
    }
}

#[test]
fn brain_health_score_rebuilds_from_its_domains() {
    let inputs = BrainHealthInputs {
        cognitive_percentile: Some(88.0),
        promis_depression_t: Some(58.0),
        promis_anxiety_t: Some(52.0),
        promis_sleep_t: Some(61.0),
        perceived_stress: Some(18.0),
        resilience: Some(3.8),
        optimism: Some(18.0),
        meaning: Some(27.0),
        flourishing: Some(47.0),
        ..BrainHealthInputs::default()
    };
    let result = brain_health(&inputs, 1.0);

    let recomputed: f64 = result.domains.iter().map(|d| d.weighted_points).sum();
    assert!((recomputed - result.score).abs() < 1e-9);
    assert_eq!(result.domains.len(), 9);
    assert!(result.domains.iter().all(|d| d.raw.is_some()));
}

#[test]
fn level_boundary_splits_at_exactly_85() {
    // Depression T in the moderate band drags an otherwise perfect profile
    // just around the Optimal threshold.
    let mut inputs = BrainHealthInputs {
        promis_depression_t: Some(62.0),
        ..BrainHealthInputs::default()
    };
    let result = brain_health(&inputs, 1.0);
    // 29.7 + 40*0.12 + 58 = 92.5 stays Optimal; push cognitive down instead.
    assert_eq!(result.level, WellnessLevel::Optimal);

    inputs.cognitive_percentile = Some(45.0);
    let result = brain_health(&inputs, 1.0);
    // 13.5 + 4.8 + 58 = 76.3.
    assert!((result.score - 76.3).abs() < 1e-9);
    assert_eq!(result.level, WellnessLevel::Healthy);
}

#[test]
fn trend_tracks_the_prior_composite_not_the_domains() {
    let inputs = BrainHealthInputs {
        promis_depression_t: Some(58.0),
        prior: Some(prior(99.0)),
        ..BrainHealthInputs::default()
    };
    let result = brain_health(&inputs, 1.0);
    assert!((result.score - 98.5).abs() < 1e-9);
    assert_eq!(result.trend, Trend::Stable);

    let inputs = BrainHealthInputs {
        promis_depression_t: Some(58.0),
        prior: Some(prior(99.6)),
        ..BrainHealthInputs::default()
    };
    assert_eq!(brain_health(&inputs, 1.0).trend, Trend::Worsening);
}

#[test]
fn be_connected_degrades_gracefully_with_partial_inputs() {
    let inputs = BeConnectedInputs {
        loneliness: Some(6.0),
        prior: Some(prior(70.0)),
        ..BeConnectedInputs::default()
    };
    let result = be_connected(&inputs, 1.0);
    // 40*0.35 + defaults 100*0.65 = 79.
    assert!((result.score - 79.0).abs() < 1e-9);
    assert_eq!(result.level, WellnessLevel::Healthy);
    assert_eq!(result.trend, Trend::Improving);
}
