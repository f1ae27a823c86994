use std::collections::BTreeSet;
use crate::core::error::MatchError;
use crate::models::{Candidate, Casting, SearchFilters};

/// Inclusive numeric bounds; a missing side is open
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Both sides present
    pub fn is_closed(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    fn validate(&self, field: &str) -> Result<(), MatchError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(MatchError::InvalidArgument(format!(
                    "{} bound must be a non-negative number, got {}",
                    field, bound
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(MatchError::InvalidArgument(format!(
                    "{} range is inverted: min {} > max {}",
                    field, min, max
                )));
            }
        }
        Ok(())
    }
}

/// Canonical matching target shared by every factor scorer
///
/// Every field is optional. An absent field (or empty set) leaves that
/// dimension unconstrained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    pub city: Option<String>,
    pub gender: Option<String>,
    pub age: Option<Bounds>,
    pub height_cm: Option<Bounds>,
    pub weight_kg: Option<Bounds>,
    pub categories: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub job_type: Option<String>,
}

impl Criteria {
    /// Derive criteria from a casting posting
    ///
    /// Posting ranges are whole numbers; they are widened to `f64` here so
    /// scorers compare against candidate attributes without conversions.
    pub fn from_posting(casting: &Casting) -> Self {
        Self {
            city: non_blank(&casting.city),
            gender: non_blank(&casting.gender),
            age: Bounds::new(
                casting.age_min.map(f64::from),
                casting.age_max.map(f64::from),
            ),
            height_cm: Bounds::new(
                casting.height_min.map(f64::from),
                casting.height_max.map(f64::from),
            ),
            weight_kg: Bounds::new(
                casting.weight_min.map(f64::from),
                casting.weight_max.map(f64::from),
            ),
            categories: to_set(&casting.categories),
            languages: to_set(&casting.languages),
            job_type: non_blank(&casting.job_type),
        }
    }

    /// Derive criteria from explicit search filters
    pub fn from_filters(filters: &SearchFilters) -> Self {
        Self {
            city: non_blank(&filters.city),
            gender: non_blank(&filters.gender),
            age: Bounds::new(filters.age_min, filters.age_max),
            height_cm: Bounds::new(filters.height_min, filters.height_max),
            weight_kg: Bounds::new(filters.weight_min, filters.weight_max),
            categories: to_set(&filters.categories),
            languages: to_set(&filters.languages),
            job_type: non_blank(&filters.job_type),
        }
    }

    /// Criteria for "models like this one": city, categories and gender only
    pub fn from_candidate(anchor: &Candidate) -> Self {
        Self {
            city: non_blank(&anchor.city),
            gender: non_blank(&anchor.gender),
            categories: to_set(anchor.categories.iter()),
            ..Self::default()
        }
    }

    /// Reject bounds that can never be satisfied
    pub fn validate(&self) -> Result<(), MatchError> {
        if let Some(age) = &self.age {
            age.validate("age")?;
        }
        if let Some(height) = &self.height_cm {
            height.validate("height")?;
        }
        if let Some(weight) = &self.weight_kg {
            weight.validate("weight")?;
        }
        Ok(())
    }

    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn to_set<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
