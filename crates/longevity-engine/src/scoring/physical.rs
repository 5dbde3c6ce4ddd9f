//! Physical-performance assessment generator. Every metric yields exactly
//! one finding. When a metric carries several signals (percentile plus
//! asymmetry plus a timed test), the finding severity is the maximum across
//! the triggered signals and the text concatenates every triggered reason.

use super::severity::Severity;
use super::text::{first_numeric_token, scan_keywords, KeywordVerdict};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalMetric {
    AerobicFitness,
    Gait,
    Quadriceps,
    Grip,
    Power,
    Balance,
    ChairRise,
    FloorToStand,
    Posture,
    Mobility,
    TrunkEndurance,
    HipStrength,
    CalfStrength,
    RotatorCuff,
    IsometricThighPull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Optimal,
    SubOptimal,
    Informational,
    DataMissing,
}

impl FindingStatus {
    pub fn label(self) -> &'static str {
        match self {
            FindingStatus::Optimal => "Optimal",
            FindingStatus::SubOptimal => "Sub-optimal",
            FindingStatus::Informational => "Informational",
            FindingStatus::DataMissing => "Data missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentFinding {
    pub metric: PhysicalMetric,
    pub status: FindingStatus,
    pub severity: Severity,
    pub finding: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInputs {
    pub vo2max_percentile: Option<f64>,
    pub gait_speed_percentile: Option<f64>,
    pub gait_notes: Option<String>,
    pub quadriceps_percentile: Option<f64>,
    pub quadriceps_asymmetry_pct: Option<f64>,
    pub grip_percentile: Option<f64>,
    pub grip_asymmetry_pct: Option<f64>,
    pub leg_power_percentile: Option<f64>,
    /// CTSIB composite percentile.
    pub balance_percentile: Option<f64>,
    pub balance_eyes_closed_seconds: Option<f64>,
    pub chair_rise_percentile: Option<f64>,
    /// Five-repetition sit-to-stand time.
    pub chair_rise_seconds: Option<f64>,
    pub floor_to_stand_notes: Option<String>,
    /// e.g. "posture: 6cm forward head offset".
    pub posture_notes: Option<String>,
    pub mobility_notes: Option<String>,
    pub trunk_endurance_seconds: Option<f64>,
    pub hip_strength_notes: Option<String>,
    pub calf_asymmetry_pct: Option<f64>,
    pub calf_notes: Option<String>,
    pub rotator_cuff_notes: Option<String>,
    pub imtp_percentile: Option<f64>,
}

const BALANCE_EYES_CLOSED_FLOOR_SECONDS: f64 = 10.0;
const CHAIR_RISE_CEILING_SECONDS: f64 = 12.0;
const TRUNK_ENDURANCE_MILD_SECONDS: f64 = 60.0;
const TRUNK_ENDURANCE_MODERATE_SECONDS: f64 = 30.0;
const POSTURE_OFFSET_CEILING_CM: f64 = 4.0;

struct Signal {
    severity: Severity,
    reason: String,
}

fn percentile_signal(label: &str, percentile: f64) -> Signal {
    let (severity, phrase) = if percentile >= 75.0 {
        (Severity::None, "at or above the 75th percentile")
    } else if percentile >= 50.0 {
        (Severity::Mild, "in the 50th-74th percentile band")
    } else if percentile >= 26.0 {
        (Severity::Moderate, "in the 26th-49th percentile band")
    } else {
        (Severity::Severe, "below the 26th percentile")
    };
    Signal {
        severity,
        reason: format!("{label} {phrase} ({percentile:.0})"),
    }
}

fn asymmetry_signal(label: &str, pct: f64) -> Signal {
    let severity = if pct > 20.0 {
        Severity::Moderate
    } else if pct > 10.0 {
        Severity::Mild
    } else {
        Severity::None
    };
    Signal {
        severity,
        reason: format!("{label} side-to-side asymmetry {pct:.0}%"),
    }
}

fn keyword_signal(text: &str) -> Option<Signal> {
    match scan_keywords(text) {
        KeywordVerdict::Deficit => Some(Signal {
            severity: Severity::Mild,
            reason: format!("deficit language in notes: '{}'", text.trim()),
        }),
        KeywordVerdict::ClearlyNormal => Some(Signal {
            severity: Severity::None,
            reason: format!("notes read clearly normal: '{}'", text.trim()),
        }),
        KeywordVerdict::Inconclusive => None,
    }
}

/// Numeric first, keywords second. A note with neither yields no signal and
/// the metric reads Informational.
fn posture_signal(text: &str) -> Option<Signal> {
    if let Some(offset) = first_numeric_token(text) {
        let severity = if offset.abs() > POSTURE_OFFSET_CEILING_CM {
            Severity::Mild
        } else {
            Severity::None
        };
        return Some(Signal {
            severity,
            reason: format!("measured offset {offset:.1} cm"),
        });
    }
    keyword_signal(text)
}

fn finding_from(metric: PhysicalMetric, had_input: bool, signals: Vec<Signal>) -> AssessmentFinding {
    if !had_input {
        return AssessmentFinding {
            metric,
            status: FindingStatus::DataMissing,
            severity: Severity::Unknown,
            finding: "Data missing".to_string(),
        };
    }
    if signals.is_empty() {
        return AssessmentFinding {
            metric,
            status: FindingStatus::Informational,
            severity: Severity::Unknown,
            finding: "Recorded for information; no scoring signal recognized".to_string(),
        };
    }

    let severity = signals
        .iter()
        .map(|signal| signal.severity)
        .max()
        .unwrap_or(Severity::Unknown);
    let status = if severity <= Severity::None {
        FindingStatus::Optimal
    } else {
        FindingStatus::SubOptimal
    };
    let finding = signals
        .iter()
        .map(|signal| signal.reason.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    AssessmentFinding {
        metric,
        status,
        severity,
        finding,
    }
}

/// Metric driven by an optional percentile plus optional free text.
fn percentile_and_notes(
    metric: PhysicalMetric,
    label: &str,
    percentile: Option<f64>,
    notes: Option<&str>,
) -> AssessmentFinding {
    let mut signals = Vec::new();
    if let Some(p) = percentile {
        signals.push(percentile_signal(label, p));
    }
    if let Some(text) = notes {
        if let Some(signal) = keyword_signal(text) {
            signals.push(signal);
        }
    }
    finding_from(metric, percentile.is_some() || notes.is_some(), signals)
}

/// Metric driven only by qualitative notes.
fn notes_only(metric: PhysicalMetric, notes: Option<&str>) -> AssessmentFinding {
    let signals = notes.and_then(keyword_signal).into_iter().collect();
    finding_from(metric, notes.is_some(), signals)
}

pub fn assess(inputs: &PhysicalInputs) -> Vec<AssessmentFinding> {
    let mut findings = Vec::with_capacity(15);

    findings.push(percentile_and_notes(
        PhysicalMetric::AerobicFitness,
        "VO2max",
        inputs.vo2max_percentile,
        None,
    ));

    findings.push(percentile_and_notes(
        PhysicalMetric::Gait,
        "gait speed",
        inputs.gait_speed_percentile,
        inputs.gait_notes.as_deref(),
    ));

    {
        let mut signals = Vec::new();
        if let Some(p) = inputs.quadriceps_percentile {
            signals.push(percentile_signal("quadriceps strength", p));
        }
        if let Some(pct) = inputs.quadriceps_asymmetry_pct {
            signals.push(asymmetry_signal("quadriceps", pct));
        }
        findings.push(finding_from(
            PhysicalMetric::Quadriceps,
            inputs.quadriceps_percentile.is_some() || inputs.quadriceps_asymmetry_pct.is_some(),
            signals,
        ));
    }

    {
        let mut signals = Vec::new();
        if let Some(p) = inputs.grip_percentile {
            signals.push(percentile_signal("grip strength", p));
        }
        if let Some(pct) = inputs.grip_asymmetry_pct {
            signals.push(asymmetry_signal("grip", pct));
        }
        findings.push(finding_from(
            PhysicalMetric::Grip,
            inputs.grip_percentile.is_some() || inputs.grip_asymmetry_pct.is_some(),
            signals,
        ));
    }

    findings.push(percentile_and_notes(
        PhysicalMetric::Power,
        "leg power",
        inputs.leg_power_percentile,
        None,
    ));

    {
        let mut signals = Vec::new();
        if let Some(p) = inputs.balance_percentile {
            signals.push(percentile_signal("balance", p));
        }
        if let Some(seconds) = inputs.balance_eyes_closed_seconds {
            if seconds < BALANCE_EYES_CLOSED_FLOOR_SECONDS {
                signals.push(Signal {
                    severity: Severity::Moderate,
                    reason: format!("eyes-closed stance held {seconds:.0} s (under 10 s)"),
                });
            } else {
                signals.push(Signal {
                    severity: Severity::None,
                    reason: format!("eyes-closed stance held {seconds:.0} s"),
                });
            }
        }
        findings.push(finding_from(
            PhysicalMetric::Balance,
            inputs.balance_percentile.is_some() || inputs.balance_eyes_closed_seconds.is_some(),
            signals,
        ));
    }

    {
        let mut signals = Vec::new();
        if let Some(p) = inputs.chair_rise_percentile {
            signals.push(percentile_signal("chair rise", p));
        }
        if let Some(seconds) = inputs.chair_rise_seconds {
            if seconds > CHAIR_RISE_CEILING_SECONDS {
                signals.push(Signal {
                    severity: Severity::Moderate,
                    reason: format!("five-repetition sit-to-stand {seconds:.1} s (over 12 s)"),
                });
            } else {
                signals.push(Signal {
                    severity: Severity::None,
                    reason: format!("five-repetition sit-to-stand {seconds:.1} s"),
                });
            }
        }
        findings.push(finding_from(
            PhysicalMetric::ChairRise,
            inputs.chair_rise_percentile.is_some() || inputs.chair_rise_seconds.is_some(),
            signals,
        ));
    }

    findings.push(notes_only(
        PhysicalMetric::FloorToStand,
        inputs.floor_to_stand_notes.as_deref(),
    ));

    {
        let signals = inputs
            .posture_notes
            .as_deref()
            .and_then(posture_signal)
            .into_iter()
            .collect();
        findings.push(finding_from(
            PhysicalMetric::Posture,
            inputs.posture_notes.is_some(),
            signals,
        ));
    }

    findings.push(notes_only(
        PhysicalMetric::Mobility,
        inputs.mobility_notes.as_deref(),
    ));

    {
        let signals = inputs
            .trunk_endurance_seconds
            .map(|seconds| {
                let severity = if seconds < TRUNK_ENDURANCE_MODERATE_SECONDS {
                    Severity::Moderate
                } else if seconds < TRUNK_ENDURANCE_MILD_SECONDS {
                    Severity::Mild
                } else {
                    Severity::None
                };
                Signal {
                    severity,
                    reason: format!("trunk endurance hold {seconds:.0} s"),
                }
            })
            .into_iter()
            .collect();
        findings.push(finding_from(
            PhysicalMetric::TrunkEndurance,
            inputs.trunk_endurance_seconds.is_some(),
            signals,
        ));
    }

    findings.push(notes_only(
        PhysicalMetric::HipStrength,
        inputs.hip_strength_notes.as_deref(),
    ));

    {
        let mut signals = Vec::new();
        if let Some(pct) = inputs.calf_asymmetry_pct {
            signals.push(asymmetry_signal("calf", pct));
        }
        if let Some(text) = inputs.calf_notes.as_deref() {
            if let Some(signal) = keyword_signal(text) {
                signals.push(signal);
            }
        }
        findings.push(finding_from(
            PhysicalMetric::CalfStrength,
            inputs.calf_asymmetry_pct.is_some() || inputs.calf_notes.is_some(),
            signals,
        ));
    }

    findings.push(notes_only(
        PhysicalMetric::RotatorCuff,
        inputs.rotator_cuff_notes.as_deref(),
    ));

    findings.push(percentile_and_notes(
        PhysicalMetric::IsometricThighPull,
        "isometric mid-thigh pull",
        inputs.imtp_percentile,
        None,
    ));

    findings
}
