// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BatchMatchEntry, Candidate, Casting, Compatibility, MatchResult, MatchingWeights, PlatformStats, ScoreBreakdown, SearchFilters};
pub use requests::{BatchMatchRequest, CompatibilityQuery, LimitQuery, SearchModelsRequest, UpdateWeightsRequest};
pub use responses::{BatchMatchResponse, ErrorResponse, HealthResponse, MatchListResponse, WeightsResponse};
