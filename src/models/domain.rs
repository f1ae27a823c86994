use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Public model profile as seen by the matching engine
///
/// Every attribute other than the id may be missing on a partially filled
/// profile. Missing attributes never match a constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "modelId")]
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "heightCm", default)]
    pub height_cm: Option<f64>,
    #[serde(rename = "weightKg", default)]
    pub weight_kg: Option<f64>,
    #[serde(rename = "experienceYears", default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(rename = "isPublic", default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool { true }

impl Candidate {
    /// Name shown in match results, falling back to the id
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

/// Casting posting that models are matched against
///
/// Ranges use whole centimetres, kilograms and years as stored by the
/// posting service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Casting {
    #[serde(rename = "castingId")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "ownerId", default)]
    pub owner_id: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "ageMin", default)]
    pub age_min: Option<u8>,
    #[serde(rename = "ageMax", default)]
    pub age_max: Option<u8>,
    #[serde(rename = "heightMin", default)]
    pub height_min: Option<u16>,
    #[serde(rename = "heightMax", default)]
    pub height_max: Option<u16>,
    #[serde(rename = "weightMin", default)]
    pub weight_min: Option<u16>,
    #[serde(rename = "weightMax", default)]
    pub weight_max: Option<u16>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
}

/// Explicit search filters supplied by a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "ageMin", default)]
    pub age_min: Option<f64>,
    #[serde(rename = "ageMax", default)]
    pub age_max: Option<f64>,
    #[serde(rename = "heightMin", default)]
    pub height_min: Option<f64>,
    #[serde(rename = "heightMax", default)]
    pub height_max: Option<f64>,
    #[serde(rename = "weightMin", default)]
    pub weight_min: Option<f64>,
    #[serde(rename = "weightMax", default)]
    pub weight_max: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
}

/// Per-factor scores (0-100) and their weighted total
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub demographics: f64,
    pub physical: f64,
    pub professional: f64,
    pub geographic: f64,
    pub specialized: f64,
    #[serde(rename = "totalScore")]
    pub total: f64,
}

/// Ranked match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "modelId")]
    pub model_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Scoring weights, one per factor category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingWeights {
    pub demographics: f64,
    pub physical: f64,
    pub professional: f64,
    pub geographic: f64,
    pub specialized: f64,
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.demographics + self.physical + self.professional + self.geographic + self.specialized
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.demographics,
            self.physical,
            self.professional,
            self.geographic,
            self.specialized,
        ]
    }
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            demographics: 0.20,
            physical: 0.25,
            professional: 0.20,
            geographic: 0.15,
            specialized: 0.20,
        }
    }
}

/// Compatibility report for one model against one casting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(rename = "modelId")]
    pub model_id: String,
    #[serde(rename = "castingId")]
    pub casting_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Outcome of ranking a single casting inside a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMatchEntry {
    #[serde(rename = "castingId")]
    pub casting_id: String,
    pub matches: Vec<MatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Platform-wide matching statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformStats {
    #[serde(rename = "totalModels")]
    pub total_models: u64,
    #[serde(rename = "totalCastings")]
    pub total_castings: u64,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = MatchingWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_candidate_deserializes_partial_document() {
        let json = serde_json::json!({
            "modelId": "m1",
            "city": "Almaty",
            "categories": ["fashion", "fashion", "sport"]
        });

        let candidate: Candidate = serde_json::from_value(json).unwrap();

        assert_eq!(candidate.id, "m1");
        assert!(candidate.is_public);
        assert!(candidate.height_cm.is_none());
        assert_eq!(candidate.categories.len(), 2);
        assert_eq!(candidate.name(), "m1");
    }
}
