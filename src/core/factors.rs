use std::collections::BTreeSet;
use crate::core::criteria::Criteria;
use crate::models::Candidate;

/// Score given to a factor the criteria leave unconstrained
pub const UNCONSTRAINED_SCORE: f64 = 100.0;

const EXPERIENCE_YEARS_THRESHOLD: u32 = 2;
const EXPERIENCE_POINTS: f64 = 60.0;
const RATING_THRESHOLD: f64 = 4.0;
const RATING_POINTS: f64 = 40.0;
const CATEGORY_POINTS: f64 = 60.0;
const LANGUAGE_POINTS: f64 = 40.0;

/// Share of passed checks, scaled to 0-100
///
/// An empty check list means nothing was constrained.
#[inline]
fn checks_score(checks: &[bool]) -> f64 {
    if checks.is_empty() {
        return UNCONSTRAINED_SCORE;
    }
    let passed = checks.iter().filter(|passed| **passed).count();
    passed as f64 / checks.len() as f64 * 100.0
}

#[inline]
fn same_text(candidate: Option<&str>, wanted: &str) -> bool {
    candidate.map_or(false, |value| value == wanted)
}

/// Demographics: gender, age range and city, each an equal share
#[inline]
pub fn demographics_score(candidate: &Candidate, criteria: &Criteria) -> f64 {
    let mut checks = Vec::with_capacity(3);

    if let Some(gender) = &criteria.gender {
        checks.push(same_text(candidate.gender.as_deref(), gender));
    }

    if let Some(age) = &criteria.age {
        checks.push(candidate.age.map_or(false, |a| age.contains(f64::from(a))));
    }

    if let Some(city) = &criteria.city {
        checks.push(same_text(candidate.city.as_deref(), city));
    }

    checks_score(&checks)
}

/// Physical: height and weight, each counted only for a closed range
#[inline]
pub fn physical_score(candidate: &Candidate, criteria: &Criteria) -> f64 {
    let mut checks = Vec::with_capacity(2);

    if let Some(height) = criteria.height_cm.filter(|b| b.is_closed()) {
        checks.push(candidate.height_cm.map_or(false, |h| height.contains(h)));
    }

    if let Some(weight) = criteria.weight_kg.filter(|b| b.is_closed()) {
        checks.push(candidate.weight_kg.map_or(false, |w| weight.contains(w)));
    }

    checks_score(&checks)
}

/// Professional: experience and rating of the candidate alone
///
/// Yields 0, 40, 60 or 100.
#[inline]
pub fn professional_score(candidate: &Candidate, _criteria: &Criteria) -> f64 {
    let mut score = 0.0;

    if candidate.experience_years.unwrap_or(0) > EXPERIENCE_YEARS_THRESHOLD {
        score += EXPERIENCE_POINTS;
    }

    if candidate.rating.map_or(false, |r| r >= RATING_THRESHOLD) {
        score += RATING_POINTS;
    }

    score
}

/// Geographic: same city or no city constraint
#[inline]
pub fn geographic_score(candidate: &Candidate, criteria: &Criteria) -> f64 {
    match &criteria.city {
        None => UNCONSTRAINED_SCORE,
        Some(city) if same_text(candidate.city.as_deref(), city) => 100.0,
        Some(_) => 0.0,
    }
}

/// Specialized: category overlap (60 points) plus language overlap (40 points)
///
/// Each term is only added when the criteria name at least one value for it,
/// and the counted terms are summed rather than averaged. A category-only
/// constraint therefore tops out at 60: asking for {fashion, sport} from a
/// fashion-only model yields 30.
#[inline]
pub fn specialized_score(candidate: &Candidate, criteria: &Criteria) -> f64 {
    if criteria.categories.is_empty() && criteria.languages.is_empty() {
        return UNCONSTRAINED_SCORE;
    }

    let mut score = 0.0;

    if !criteria.categories.is_empty() {
        score += overlap_ratio(&candidate.categories, &criteria.categories) * CATEGORY_POINTS;
    }

    if !criteria.languages.is_empty() {
        score += overlap_ratio(&candidate.languages, &criteria.languages) * LANGUAGE_POINTS;
    }

    score
}

/// |have ∩ wanted| / |wanted|
#[inline]
pub fn overlap_ratio(have: &BTreeSet<String>, wanted: &BTreeSet<String>) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }
    have.intersection(wanted).count() as f64 / wanted.len() as f64
}
