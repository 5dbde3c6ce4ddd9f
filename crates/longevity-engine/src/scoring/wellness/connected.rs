//! BeConnected: social-connection sibling of BrainHealth. Loneliness is the
//! dominant domain; community involvement arrives as free text.

use super::{
    band_points, detect_trend, DomainContribution, PriorAssessment, Trend, WellnessLevel,
};
use serde::{Deserialize, Serialize};

const W_LONELINESS: f64 = 0.35;
const W_RELATIONSHIPS: f64 = 0.25;
const W_COMMUNITY: f64 = 0.20;
const W_SUPPORT: f64 = 0.20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeConnectedInputs {
    /// UCLA 3-item loneliness total, 3-9; lower is better.
    pub loneliness: Option<f64>,
    /// Self-rated relationship satisfaction, 0-100.
    pub relationship_satisfaction: Option<f64>,
    /// Free text: "weekly", "monthly", "rarely", "never".
    pub community_involvement: Option<String>,
    /// Number of people the member could call on for help.
    pub support_network_size: Option<u32>,
    pub prior: Option<PriorAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeConnectedResult {
    pub score: f64,
    pub level: WellnessLevel,
    pub trend: Trend,
    pub domains: Vec<DomainContribution>,
}

fn loneliness_points(total: f64) -> f64 {
    if total <= 3.0 {
        100.0
    } else if total <= 5.0 {
        70.0
    } else if total <= 7.0 {
        40.0
    } else {
        20.0
    }
}

fn community_points(text: &str) -> Option<(f64, &'static str)> {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized.contains("daily") || normalized.contains("week") {
        Some((100.0, "weekly or more"))
    } else if normalized.contains("month") {
        Some((70.0, "monthly"))
    } else if normalized.contains("rare") || normalized.contains("seldom") {
        Some((40.0, "rarely"))
    } else if normalized.contains("never") || normalized.contains("none") {
        Some((20.0, "never"))
    } else {
        None
    }
}

fn support_points(size: u32) -> f64 {
    match size {
        0 => 20.0,
        1 => 40.0,
        2..=3 => 70.0,
        _ => 100.0,
    }
}

pub fn be_connected(inputs: &BeConnectedInputs, trend_delta: f64) -> BeConnectedResult {
    let mut domains = Vec::with_capacity(4);

    domains.push(match inputs.loneliness {
        Some(total) => DomainContribution::measured(
            "loneliness",
            total,
            loneliness_points(total),
            W_LONELINESS,
            format!("UCLA-3 loneliness {total:.0}"),
        ),
        None => DomainContribution::defaulted("loneliness", 100.0, W_LONELINESS),
    });

    domains.push(match inputs.relationship_satisfaction {
        Some(value) => DomainContribution::measured(
            "relationships",
            value,
            band_points(value.clamp(0.0, 100.0)),
            W_RELATIONSHIPS,
            format!("relationship satisfaction {value:.0}/100"),
        ),
        None => DomainContribution::defaulted("relationships", 100.0, W_RELATIONSHIPS),
    });

    // Unparseable free text degrades to the default rather than guessing a band.
    let community = inputs
        .community_involvement
        .as_deref()
        .and_then(community_points);
    domains.push(match community {
        Some((points, phrase)) => DomainContribution {
            domain: "community",
            raw: None,
            points,
            weight: W_COMMUNITY,
            weighted_points: points * W_COMMUNITY,
            notes: format!("community involvement: {phrase}"),
        },
        None => DomainContribution::defaulted("community", 100.0, W_COMMUNITY),
    });

    domains.push(match inputs.support_network_size {
        Some(size) => DomainContribution::measured(
            "support",
            f64::from(size),
            support_points(size),
            W_SUPPORT,
            format!("support network of {size}"),
        ),
        None => DomainContribution::defaulted("support", 100.0, W_SUPPORT),
    });

    let score: f64 = domains.iter().map(|d| d.weighted_points).sum();

    BeConnectedResult {
        score,
        level: WellnessLevel::from_score(score),
        trend: detect_trend(score, inputs.prior.as_ref().map(|p| p.score), trend_delta),
        domains,
    }
}
