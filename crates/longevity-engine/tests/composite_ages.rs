use longevity_engine::scoring::health_age::{health_age, HealthAgeInputs, HealthFactor};
use longevity_engine::scoring::performance_age::{performance_age, PerformanceAgeInputs};
use longevity_engine::scoring::phenoage::{phenotypic_age, PhenoAgeInputs};

fn blood_panel(age: f64) -> PhenoAgeInputs {
    PhenoAgeInputs {
        chronological_age: age,
        albumin: 4.5,
        creatinine: 0.85,
        glucose: 88.0,
        crp: 0.6,
        lymphocyte_pct: 34.0,
        mean_cell_volume: 88.0,
        red_cell_distribution_width: 12.5,
        alkaline_phosphatase: 60.0,
        white_blood_cells: 5.2,
    }
}

#[test]
fn phenoage_feeds_health_age_downstream() {
    let pheno = phenotypic_age(&blood_panel(50.0)).expect("valid panel");
    assert!(pheno.mortality_10yr > 0.0 && pheno.mortality_10yr < 1.0);

    let inputs = HealthAgeInputs {
        chronological_age: 50.0,
        phenotypic_age_years: pheno.phenotypic_age_years,
        visceral_fat_percentile: Some(90.0),
        systolic_bp: Some(118.0),
        diastolic_bp: Some(76.0),
        ..HealthAgeInputs::default()
    };
    let result = health_age(&inputs).expect("scores");

    // +15% and -10% of age 50, scaled by 0.3 on top of the phenotypic age.
    let expected_sum = 0.15 * 50.0 - 0.10 * 50.0;
    assert!((result.sum_contribution_years - expected_sum).abs() < 1e-9);
    assert!(
        (result.health_age_years - (pheno.phenotypic_age_years + expected_sum * 0.3)).abs() < 1e-9
    );

    let kinds: Vec<_> = result.factors.iter().map(|f| f.factor).collect();
    assert_eq!(
        kinds,
        vec![HealthFactor::VisceralFat, HealthFactor::BloodPressure]
    );
}

#[test]
fn factor_lists_mirror_exactly_the_supplied_subset() {
    let pheno = phenotypic_age(&blood_panel(61.0)).expect("valid panel");

    let inputs = HealthAgeInputs {
        chronological_age: 61.0,
        phenotypic_age_years: pheno.phenotypic_age_years,
        homa_ir: Some(3.4),
        fib4: Some(1.1),
        // A systolic without its diastolic must not surface a factor.
        systolic_bp: Some(150.0),
        ..HealthAgeInputs::default()
    };
    let result = health_age(&inputs).expect("scores");

    let kinds: Vec<_> = result.factors.iter().map(|f| f.factor).collect();
    assert_eq!(kinds, vec![HealthFactor::HomaIr, HealthFactor::Fib4]);
    assert!(result
        .factors
        .iter()
        .all(|f| f.percent_of_age != 0.0 || f.contribution_years == 0.0));
}

#[test]
fn performance_age_reference_case_holds_end_to_end() {
    let inputs = PerformanceAgeInputs {
        chronological_age: 50.0,
        vo2max_percentile: Some(80.0),
        ..PerformanceAgeInputs::default()
    };
    let result = performance_age(&inputs).expect("scores");

    assert!((result.sum_contribution_years + 7.5).abs() < 1e-9);
    assert!((result.scaled_adjustment_years + 2.25).abs() < 1e-9);
    assert!((result.performance_age_years - 47.75).abs() < 1e-9);
    assert!((result.delta_years + 2.25).abs() < 1e-9);
}

#[test]
fn phenoage_validation_names_every_offending_field() {
    for (field, mutate) in [
        (
            "chronological_age",
            Box::new(|p: &mut PhenoAgeInputs| p.chronological_age = 0.0)
                as Box<dyn Fn(&mut PhenoAgeInputs)>,
        ),
        ("glucose", Box::new(|p: &mut PhenoAgeInputs| p.glucose = -4.0)),
        (
            "white_blood_cells",
            Box::new(|p: &mut PhenoAgeInputs| p.white_blood_cells = 0.0),
        ),
    ] {
        let mut panel = blood_panel(50.0);
        mutate(&mut panel);
        let err = phenotypic_age(&panel).expect_err("non-positive input rejected");
        assert_eq!(err.field(), field);
    }
}
