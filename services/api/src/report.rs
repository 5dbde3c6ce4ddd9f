use longevity_engine::config::EngineConfig;
use longevity_engine::scoring::cardiology::{self, CardiologyInputs, CardiologyResult};
use longevity_engine::scoring::health_age::{health_age, HealthAgeInputs, HealthAgeResult};
use longevity_engine::scoring::metabolic::{classify, MetabolicInputs, MetabolicResult};
use longevity_engine::scoring::performance_age::{
    performance_age, PerformanceAgeInputs, PerformanceAgeResult,
};
use longevity_engine::scoring::phenoage::{phenotypic_age, PhenoAgeInputs, PhenoAgeResult};
use longevity_engine::scoring::physical::{assess, AssessmentFinding, PhysicalInputs};
use longevity_engine::scoring::toxins::{self, ToxinInputs, ToxinResult};
use longevity_engine::scoring::wellness::brain::{brain_health, BrainHealthInputs, BrainHealthResult};
use longevity_engine::scoring::wellness::connected::{
    be_connected, BeConnectedInputs, BeConnectedResult,
};
use longevity_engine::scoring::wellness::emotional::{
    mentally_emotionally_well, MentallyEmotionallyWellInputs, MentallyEmotionallyWellResult,
};
use longevity_engine::scoring::wellness::mindset::{
    longevity_mindset, LongevityMindsetInputs, LongevityMindsetResult,
};
use longevity_engine::scoring::ScoringError;
use serde::{Deserialize, Serialize};

/// Everything a report run may carry. Every section is optional; an absent
/// section simply produces no output for it.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReportSnapshot {
    pub(crate) blood_panel: Option<PhenoAgeInputs>,
    pub(crate) health_age: Option<HealthAgeInputs>,
    pub(crate) performance_age: Option<PerformanceAgeInputs>,
    pub(crate) brain_health: Option<BrainHealthInputs>,
    pub(crate) longevity_mindset: Option<LongevityMindsetInputs>,
    pub(crate) emotional_wellbeing: Option<MentallyEmotionallyWellInputs>,
    pub(crate) connectedness: Option<BeConnectedInputs>,
    pub(crate) cardiology: Option<CardiologyInputs>,
    pub(crate) metabolic: Option<MetabolicInputs>,
    pub(crate) toxins: Option<ToxinInputs>,
    pub(crate) physical: Option<PhysicalInputs>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HealthReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) phenoage: Option<PhenoAgeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) health_age: Option<HealthAgeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) performance_age: Option<PerformanceAgeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) brain_health: Option<BrainHealthResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) longevity_mindset: Option<LongevityMindsetResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) emotional_wellbeing: Option<MentallyEmotionallyWellResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) connectedness: Option<BeConnectedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cardiology: Option<CardiologyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) metabolic: Option<MetabolicResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) toxins: Option<ToxinResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) physical: Option<Vec<AssessmentFinding>>,
}

/// Runs every supplied section and wires the cross-section dependencies:
/// PhenoAge feeds the HealthAge baseline, and the computed ages flow into the
/// cardiology explanation context when the caller left them blank.
pub(crate) fn assemble(
    engine: &EngineConfig,
    snapshot: ReportSnapshot,
) -> Result<HealthReport, ScoringError> {
    let phenoage = snapshot
        .blood_panel
        .as_ref()
        .map(phenotypic_age)
        .transpose()?;

    let health = match snapshot.health_age {
        Some(mut inputs) => {
            if let Some(pheno) = &phenoage {
                inputs.phenotypic_age_years = pheno.phenotypic_age_years;
            }
            Some(health_age(&inputs)?)
        }
        None => None,
    };

    let performance = snapshot
        .performance_age
        .as_ref()
        .map(performance_age)
        .transpose()?;

    let brain = snapshot
        .brain_health
        .as_ref()
        .map(|inputs| brain_health(inputs, engine.trend_delta));
    let mindset = snapshot
        .longevity_mindset
        .as_ref()
        .map(|inputs| longevity_mindset(inputs, engine.trend_delta));
    let emotional = snapshot
        .emotional_wellbeing
        .as_ref()
        .map(|inputs| mentally_emotionally_well(inputs, engine.trend_delta));
    let connected = snapshot
        .connectedness
        .as_ref()
        .map(|inputs| be_connected(inputs, engine.trend_delta));

    let cardiac = snapshot.cardiology.map(|mut inputs| {
        if inputs.phenotypic_age_years.is_none() {
            inputs.phenotypic_age_years = phenoage.as_ref().map(|p| p.phenotypic_age_years);
        }
        if inputs.health_age_years.is_none() {
            inputs.health_age_years = health.as_ref().map(|h| h.health_age_years);
        }
        if inputs.performance_age_years.is_none() {
            inputs.performance_age_years = performance.as_ref().map(|p| p.performance_age_years);
        }
        cardiology::evaluate(engine.cardiology_model, &inputs)
    });

    let metabolic = snapshot.metabolic.as_ref().map(classify).transpose()?;
    let toxins = snapshot.toxins.as_ref().map(toxins::evaluate);
    let physical = snapshot.physical.as_ref().map(assess);

    Ok(HealthReport {
        phenoage,
        health_age: health,
        performance_age: performance,
        brain_health: brain,
        longevity_mindset: mindset,
        emotional_wellbeing: emotional,
        connectedness: connected,
        cardiology: cardiac,
        metabolic,
        toxins,
        physical,
    })
}
