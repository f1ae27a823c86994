//! Casting Match - compatibility scoring and ranking engine
//!
//! Matches model profiles against casting postings with a fixed, auditable
//! weighted sum over five factor scores (demographics, physical,
//! professional, geographic, specialized).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Criteria, MatchError, Matcher, WeightManager};
pub use models::{Candidate, Casting, MatchResult, MatchingWeights, ScoreBreakdown, SearchFilters};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let breakdown = calculate_match_score(
            &Candidate::default(),
            &Criteria::default(),
            &MatchingWeights::default(),
        );
        // professional is the only factor a blank profile can fail
        assert_eq!(breakdown.total, 80.0);
    }
}
