use longevity_engine::config::CardiologyModelVersion;
use longevity_engine::scoring::cardiology::{evaluate, CardiologyInputs, LegacyRiskCategory};

fn combinations() -> Vec<CardiologyInputs> {
    let mut cases = Vec::new();
    for cac in [None, Some(0.0), Some(40.0), Some(250.0)] {
        for ef in [None, Some(62.0), Some(48.0), Some(30.0)] {
            for stenosis in [None, Some(0.0), Some(55.0)] {
                cases.push(CardiologyInputs {
                    cac_score: cac,
                    ejection_fraction: ef,
                    cta_max_stenosis_pct: stenosis,
                    ..CardiologyInputs::default()
                });
            }
        }
    }
    cases
}

#[test]
fn baseline_category_never_undercuts_an_implied_minimum() {
    for inputs in combinations() {
        let result = evaluate(CardiologyModelVersion::V32, &inputs);
        let detail = result.two_stage.expect("two-stage detail");

        let floor = detail
            .score_category
            .max(detail.plaque_minimum)
            .max(detail.ef_minimum);
        assert_eq!(
            detail.baseline_category, floor,
            "category must equal the most severe independent derivation: {inputs:?}"
        );
        assert!(detail.baseline_category >= detail.plaque_minimum);
        assert!(detail.baseline_category >= detail.ef_minimum);
        assert!(detail.baseline_score <= 30);
    }
}

#[test]
fn ascvd_history_forces_severe_over_any_score() {
    for mut inputs in combinations() {
        inputs.ascvd_history = Some(true);
        for version in [CardiologyModelVersion::V1, CardiologyModelVersion::V32] {
            let result = evaluate(version, &inputs);
            assert_eq!(result.legacy_category, LegacyRiskCategory::Severe);
        }
    }
}

#[test]
fn heart_health_score_stays_within_bounds() {
    for mut inputs in combinations() {
        for modifiable in [None, Some(-5.0), Some(35.0), Some(120.0)] {
            inputs.modifiable_score = modifiable;
            let detail = evaluate(CardiologyModelVersion::V32, &inputs)
                .two_stage
                .expect("detail");
            assert!(detail.heart_health_score >= 0.0);
            assert!(detail.heart_health_score <= 100.0);
            if let Some(clamped) = detail.modifiable_score {
                assert!((0.0..=70.0).contains(&clamped));
            }
            assert_eq!(detail.partial, modifiable.is_none());
        }
    }
}

#[test]
fn explanations_are_deterministic_for_identical_inputs() {
    let inputs = CardiologyInputs {
        cac_score: Some(140.0),
        ejection_fraction: Some(52.0),
        phenotypic_age_years: Some(47.3),
        ..CardiologyInputs::default()
    };
    let first = evaluate(CardiologyModelVersion::V32, &inputs);
    let second = evaluate(CardiologyModelVersion::V32, &inputs);
    assert_eq!(first.explanation, second.explanation);
    assert!(first.explanation.contains("phenotypic age 47.3"));
}

#[test]
fn the_models_disagree_on_a_qualitative_low_impression() {
    // The documented v1/v3.2 divergence: "low" is a graded bucket in the
    // legacy ladder and an unrecognized severity term in the two-stage model.
    let inputs = CardiologyInputs {
        cta_qualitative: Some("low".to_string()),
        ..CardiologyInputs::default()
    };

    let v1 = evaluate(CardiologyModelVersion::V1, &inputs);
    assert_eq!(v1.legacy_category, LegacyRiskCategory::Mild);

    let v32 = evaluate(CardiologyModelVersion::V32, &inputs);
    assert_eq!(v32.legacy_category, LegacyRiskCategory::Low);
    assert_eq!(v32.two_stage.expect("detail").plaque_score, 18);
}
