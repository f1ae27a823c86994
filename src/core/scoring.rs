use serde::{Deserialize, Serialize};
use crate::core::criteria::Criteria;
use crate::core::factors::{
    demographics_score, geographic_score, physical_score, professional_score, specialized_score,
};
use crate::models::{Candidate, MatchingWeights, ScoreBreakdown};

/// Factor scores above which a match reason is reported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReasonThresholds {
    pub geographic: f64,
    pub demographics: f64,
    pub physical: f64,
    pub professional: f64,
    pub specialized: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            geographic: 80.0,
            demographics: 70.0,
            physical: 60.0,
            professional: 50.0,
            specialized: 40.0,
        }
    }
}

const RECOMMEND_GEOGRAPHIC_BELOW: f64 = 50.0;
const RECOMMEND_PHYSICAL_BELOW: f64 = 60.0;
const RECOMMEND_SPECIALIZED_BELOW: f64 = 40.0;
const EXCELLENT_MATCH_ABOVE: f64 = 80.0;

/// Calculate the weighted match score (0-100) of a candidate
///
/// Scoring formula:
/// total = (
///     demographics * w.demographics +
///     physical     * w.physical +
///     professional * w.professional +
///     geographic   * w.geographic +
///     specialized  * w.specialized
/// )
///
/// `weights` must be one snapshot for the whole call; the total is rounded
/// half away from zero to two decimals.
pub fn calculate_match_score(
    candidate: &Candidate,
    criteria: &Criteria,
    weights: &MatchingWeights,
) -> ScoreBreakdown {
    let demographics = demographics_score(candidate, criteria);
    let physical = physical_score(candidate, criteria);
    let professional = professional_score(candidate, criteria);
    let geographic = geographic_score(candidate, criteria);
    let specialized = specialized_score(candidate, criteria);

    let total = demographics * weights.demographics
        + physical * weights.physical
        + professional * weights.professional
        + geographic * weights.geographic
        + specialized * weights.specialized;

    ScoreBreakdown {
        demographics,
        physical,
        professional,
        geographic,
        specialized,
        total: round2(total.clamp(0.0, 100.0)),
    }
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human-readable reasons explaining a breakdown
pub fn generate_match_reasons(
    breakdown: &ScoreBreakdown,
    candidate: &Candidate,
    criteria: &Criteria,
    thresholds: &ReasonThresholds,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if breakdown.geographic > thresholds.geographic {
        reasons.push("Location fits the casting".to_string());
    }
    if breakdown.demographics > thresholds.demographics {
        reasons.push("Matches the demographic requirements".to_string());
    }
    if breakdown.physical > thresholds.physical {
        reasons.push("Fits the physical parameters".to_string());
    }
    if breakdown.professional > thresholds.professional {
        reasons.push("Strong professional track record".to_string());
    }
    if breakdown.specialized > thresholds.specialized {
        reasons.push("Relevant specialization".to_string());
    }

    if let (Some(wanted), Some(city)) = (&criteria.city, &candidate.city) {
        if wanted == city {
            reasons.push(format!("Based in {}", city));
        }
    }

    if !candidate.categories.is_empty() && !criteria.categories.is_empty() {
        let shared: Vec<&str> = candidate
            .categories
            .intersection(&criteria.categories)
            .map(String::as_str)
            .collect();
        if shared.is_empty() {
            reasons.push("Works in related categories".to_string());
        } else {
            reasons.push(format!("Works in {}", shared.join(", ")));
        }
    }

    reasons
}

/// Suggestions for a model to improve its fit for a casting
pub fn generate_recommendations(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut recommendations = Vec::new();

    if breakdown.geographic < RECOMMEND_GEOGRAPHIC_BELOW {
        recommendations.push("Consider castings in your city or ones you can travel to".to_string());
    }
    if breakdown.physical < RECOMMEND_PHYSICAL_BELOW {
        recommendations.push("Your physical parameters are outside the requested range".to_string());
    }
    if breakdown.specialized < RECOMMEND_SPECIALIZED_BELOW {
        recommendations.push("Add categories and languages relevant to this casting to your profile".to_string());
    }
    if breakdown.total > EXCELLENT_MATCH_ABOVE {
        recommendations.push("Excellent match, apply now".to_string());
    }

    recommendations
}
