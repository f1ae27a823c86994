use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MatchingWeights, SearchFilters};

/// Request to rank models by explicit filters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchModelsRequest {
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default = "default_limit")]
    #[validate(range(max = 500))]
    pub limit: u16,
    #[serde(default, alias = "min_score", rename = "minScore")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: f64,
}

/// Query string for endpoints that only take a limit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: u16,
}

/// Query string for the compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "model_id", rename = "modelId")]
    pub model_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "casting_id", rename = "castingId")]
    pub casting_id: String,
}

/// Request to rank models for several castings at once
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchMatchRequest {
    #[validate(length(min = 1, max = 50))]
    #[serde(alias = "casting_ids", rename = "castingIds")]
    pub casting_ids: Vec<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: u16,
}

/// Request to replace the scoring weights
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWeightsRequest {
    pub weights: MatchingWeights,
}

fn default_limit() -> u16 {
    20
}
