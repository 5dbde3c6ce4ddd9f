//! Toxin / exposure evaluator. Twelve independent predicates across three
//! evidence classes; each triggered exposure yields exactly one opportunity,
//! and opportunities are ordered by a fixed priority table rather than by
//! detection order.

use super::text::max_numeric_token;
use serde::{Deserialize, Serialize};

const BLOOD_LEAD_UPPER_UG_DL: f64 = 3.5;
const BLOOD_MERCURY_UPPER_UG_L: f64 = 10.0;
const ALCOHOL_DRINKS_PER_WEEK_LIMIT: f64 = 7.0;
const STRESS_AMPLIFICATION_THRESHOLD: f64 = 26.0;

pub const STATUS_EXPOSED: &str = "Potential Harmful Exposures Identified";
pub const STATUS_CLEAR: &str = "No Harmful Exposures Identified";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxinInputs {
    /// Free text describing tobacco/nicotine use of any form.
    pub tobacco_use: Option<String>,
    pub alcohol_drinks_per_week: Option<f64>,
    /// Free text fallback when no structured drink count exists.
    pub alcohol_description: Option<String>,
    pub cannabis_use: Option<String>,
    pub screen_time: Option<String>,
    pub processed_food: Option<String>,
    pub medication_supplement_load: Option<String>,
    pub environmental_exposures: Option<String>,
    pub media_consumption: Option<String>,
    pub stressful_environments: Option<String>,
    /// µg/dL
    pub blood_lead: Option<f64>,
    /// µg/L
    pub blood_mercury: Option<f64>,
    /// PSS-10, 0-40; feeds the amplification flag only.
    pub perceived_stress: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceClass {
    Objective,
    Subjective,
    Lab,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub key: &'static str,
    pub label: &'static str,
    pub evidence: EvidenceClass,
    pub detail: String,
    /// Stress amplification: high perceived stress on top of an
    /// independently triggered stress exposure. Never stress alone.
    pub amplified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub key: &'static str,
    pub label: &'static str,
    pub narrative: String,
    pub rank: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToxinResult {
    pub status: String,
    pub exposures: Vec<Exposure>,
    /// One per exposure, sorted by the fixed priority table.
    pub opportunities: Vec<Opportunity>,
}

/// Self-report wording that counts as a trigger.
fn subjective_triggered(text: &str) -> bool {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return false;
    }
    ["possibly", "yes", "occasional", "current", "maybe", "often", "daily", "frequent"]
        .iter()
        .any(|token| normalized.contains(token))
}

/// Current tobacco/nicotine use of any form. Negated wording (never, former,
/// quit, plain "no") does not trigger.
fn tobacco_triggered(text: &str) -> bool {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty()
        || normalized.contains("never")
        || normalized.contains("former")
        || normalized.contains("quit")
        || normalized == "no"
        || normalized.starts_with("no ")
        || normalized.starts_with("none")
    {
        return false;
    }
    ["current", "yes", "daily", "occasional", "cigarette", "vape", "vaping", "chew", "nicotine", "smoke"]
        .iter()
        .any(|token| normalized.contains(token))
}

fn alcohol_drinks(inputs: &ToxinInputs) -> Option<f64> {
    inputs.alcohol_drinks_per_week.or_else(|| {
        inputs
            .alcohol_description
            .as_deref()
            .and_then(max_numeric_token)
    })
}

fn opportunity_rank(key: &str, amplified: bool) -> u8 {
    match key {
        "lead" => 1,
        "mercury" => 2,
        "tobacco" => 3,
        "alcohol" => 4,
        "stress" if amplified => 5,
        "cannabis" => 6,
        "screen_time" => 7,
        "processed_food" => 8,
        "medication_supplement_load" => 9,
        "environmental" => 10,
        "media" => 11,
        // Non-amplified stress sorts last.
        _ => 12,
    }
}

fn narrative_for(key: &str, amplified: bool) -> &'static str {
    match key {
        "lead" => "Blood lead is above the upper reference limit; identifying and removing the source is the priority.",
        "mercury" => "Blood mercury is above the upper reference limit; review dietary and environmental sources.",
        "tobacco" => "Current nicotine exposure was reported; cessation carries the largest single risk reduction available.",
        "alcohol" => "Reported alcohol intake exceeds seven drinks per week; reduction lowers multi-system risk.",
        "stress" if amplified => "High perceived stress is compounding a reported stressful environment; both the load and the environment warrant attention.",
        "stress" => "A stressful environment or relationship was reported.",
        "cannabis" => "Cannabis use was reported; patterns of use are worth reviewing.",
        "screen_time" => "Elevated screen time was reported.",
        "processed_food" => "Regular processed-food intake was reported.",
        "medication_supplement_load" => "A notable medication or supplement load was reported and merits periodic review.",
        "environmental" => "Environmental exposures were reported.",
        _ => "Media consumption patterns were flagged by self-report.",
    }
}

pub fn evaluate(inputs: &ToxinInputs) -> ToxinResult {
    let mut exposures: Vec<Exposure> = Vec::new();

    if let Some(text) = inputs.tobacco_use.as_deref() {
        if tobacco_triggered(text) {
            exposures.push(Exposure {
                key: "tobacco",
                label: "Tobacco / nicotine",
                evidence: EvidenceClass::Objective,
                detail: format!("reported use: '{}'", text.trim()),
                amplified: false,
            });
        }
    }

    if let Some(drinks) = alcohol_drinks(inputs) {
        if drinks > ALCOHOL_DRINKS_PER_WEEK_LIMIT {
            exposures.push(Exposure {
                key: "alcohol",
                label: "Alcohol",
                evidence: EvidenceClass::Objective,
                detail: format!("{drinks:.0} drinks/week exceeds {ALCOHOL_DRINKS_PER_WEEK_LIMIT:.0}"),
                amplified: false,
            });
        }
    }

    let subjective: [(&'static str, &'static str, Option<&str>); 6] = [
        ("cannabis", "Cannabis", inputs.cannabis_use.as_deref()),
        ("screen_time", "Screen time", inputs.screen_time.as_deref()),
        ("processed_food", "Processed food", inputs.processed_food.as_deref()),
        (
            "medication_supplement_load",
            "Medications / supplements",
            inputs.medication_supplement_load.as_deref(),
        ),
        (
            "environmental",
            "Environmental exposures",
            inputs.environmental_exposures.as_deref(),
        ),
        ("media", "Media consumption", inputs.media_consumption.as_deref()),
    ];
    for (key, label, text) in subjective {
        if let Some(text) = text {
            if subjective_triggered(text) {
                exposures.push(Exposure {
                    key,
                    label,
                    evidence: EvidenceClass::Subjective,
                    detail: format!("self-report: '{}'", text.trim()),
                    amplified: false,
                });
            }
        }
    }

    let stress_triggered = inputs
        .stressful_environments
        .as_deref()
        .map(subjective_triggered)
        .unwrap_or(false);
    if stress_triggered {
        let amplified = inputs
            .perceived_stress
            .map(|score| score > STRESS_AMPLIFICATION_THRESHOLD)
            .unwrap_or(false);
        exposures.push(Exposure {
            key: "stress",
            label: "Stressful environments / relationships",
            evidence: EvidenceClass::Subjective,
            detail: if amplified {
                format!(
                    "self-reported stressful environment with perceived stress above {STRESS_AMPLIFICATION_THRESHOLD:.0}"
                )
            } else {
                "self-reported stressful environment".to_string()
            },
            amplified,
        });
    }

    if let Some(lead) = inputs.blood_lead {
        if lead > BLOOD_LEAD_UPPER_UG_DL {
            exposures.push(Exposure {
                key: "lead",
                label: "Blood lead",
                evidence: EvidenceClass::Lab,
                detail: format!("{lead:.2} µg/dL above {BLOOD_LEAD_UPPER_UG_DL} µg/dL"),
                amplified: false,
            });
        }
    }
    if let Some(mercury) = inputs.blood_mercury {
        if mercury > BLOOD_MERCURY_UPPER_UG_L {
            exposures.push(Exposure {
                key: "mercury",
                label: "Blood mercury",
                evidence: EvidenceClass::Lab,
                detail: format!("{mercury:.2} µg/L above {BLOOD_MERCURY_UPPER_UG_L} µg/L"),
                amplified: false,
            });
        }
    }

    let mut opportunities: Vec<Opportunity> = exposures
        .iter()
        .map(|exposure| Opportunity {
            key: exposure.key,
            label: exposure.label,
            narrative: narrative_for(exposure.key, exposure.amplified).to_string(),
            rank: opportunity_rank(exposure.key, exposure.amplified),
        })
        .collect();
    opportunities.sort_by_key(|opportunity| opportunity.rank);

    let status = if exposures.is_empty() {
        STATUS_CLEAR
    } else {
        STATUS_EXPOSED
    };

    ToxinResult {
        status: status.to_string(),
        exposures,
        opportunities,
    }
}
