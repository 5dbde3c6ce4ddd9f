use serde::{Deserialize, Serialize};

/// Ordered clinical severity scale. Rules compare by order (`>=`), never by
/// string equality, so the discriminant ordering is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Unknown,
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::None => "None",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

/// Parse free-text severity wording from clinician notes. Unrecognized text
/// reads Unknown so it never triggers a rule on its own.
pub fn parse_severity(value: &str) -> Severity {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Severity::Unknown;
    }
    if normalized.contains("severe")
        || normalized.contains("marked")
        || normalized.contains("significant")
        || normalized.contains("critical")
    {
        return Severity::Severe;
    }
    if normalized.contains("moderate") {
        return Severity::Moderate;
    }
    if normalized.contains("mild")
        || normalized.contains("minimal")
        || normalized.contains("trace")
        || normalized.contains("trivial")
    {
        return Severity::Mild;
    }
    if normalized.contains("none")
        || normalized.contains("normal")
        || normalized.contains("absent")
        || normalized == "no"
    {
        return Severity::None;
    }
    Severity::Unknown
}

/// Ordered scale for qualitative test results reported as low/moderate/high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualitativeLevel {
    Low,
    Moderate,
    High,
    Severe,
}

pub fn parse_qualitative(value: &str) -> Option<QualitativeLevel> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.contains("severe") {
        Some(QualitativeLevel::Severe)
    } else if normalized.contains("high") {
        Some(QualitativeLevel::High)
    } else if normalized.contains("moderate") || normalized.contains("intermediate") {
        Some(QualitativeLevel::Moderate)
    } else if normalized.contains("low") {
        Some(QualitativeLevel::Low)
    } else {
        None
    }
}

/// Clamp a percentile into the closed band used by cognitive scoring.
pub fn clamp_percentile(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

// Lab unit conversions used by the mortality model.

pub fn albumin_g_dl_to_g_l(value: f64) -> f64 {
    value * 10.0
}

pub fn creatinine_mg_dl_to_umol_l(value: f64) -> f64 {
    value * 88.4
}

pub fn glucose_mg_dl_to_mmol_l(value: f64) -> f64 {
    value * 0.05551
}

pub fn crp_mg_l_to_ln_mg_dl(value: f64) -> f64 {
    (value / 10.0).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_wording_maps_to_ordered_scale() {
        assert_eq!(parse_severity("Severe stenosis"), Severity::Severe);
        assert_eq!(parse_severity("moderate"), Severity::Moderate);
        assert_eq!(parse_severity("Minimal plaque"), Severity::Mild);
        assert_eq!(parse_severity("none noted"), Severity::None);
        assert_eq!(parse_severity("inconclusive"), Severity::Unknown);
        assert_eq!(parse_severity("  "), Severity::Unknown);
    }

    #[test]
    fn severity_orders_for_threshold_checks() {
        assert!(parse_severity("moderate") >= Severity::Mild);
        assert!(parse_severity("none") < Severity::Mild);
        assert!(Severity::Unknown < Severity::None);
    }

    #[test]
    fn qualitative_levels_parse_and_order() {
        assert_eq!(parse_qualitative("LOW"), Some(QualitativeLevel::Low));
        assert_eq!(
            parse_qualitative("intermediate risk"),
            Some(QualitativeLevel::Moderate)
        );
        assert_eq!(parse_qualitative("no result"), None);
        assert!(QualitativeLevel::High > QualitativeLevel::Moderate);
    }

    #[test]
    fn lab_conversions_match_published_factors() {
        assert_eq!(albumin_g_dl_to_g_l(4.2), 42.0);
        assert!((creatinine_mg_dl_to_umol_l(1.0) - 88.4).abs() < 1e-9);
        assert!((glucose_mg_dl_to_mmol_l(100.0) - 5.551).abs() < 1e-9);
        assert!((crp_mg_l_to_ln_mg_dl(10.0)).abs() < 1e-12);
    }
}
