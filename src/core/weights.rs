use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::core::error::MatchError;
use crate::core::repository::AuthorizationCheck;
use crate::models::MatchingWeights;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightState {
    Default,
    Custom,
}

#[derive(Debug, Clone, Copy)]
struct WeightSnapshot {
    weights: MatchingWeights,
    state: WeightState,
}

/// Holder of the shared scoring weights
///
/// Readers load one immutable snapshot per scoring call; writers publish a
/// whole new snapshot with a single pointer swap, so a reader never observes
/// a half-applied update.
pub struct WeightManager {
    current: ArcSwap<WeightSnapshot>,
    defaults: MatchingWeights,
    authorizer: Arc<dyn AuthorizationCheck>,
}

impl WeightManager {
    /// Start from `defaults`, which must themselves be valid
    pub fn new(
        defaults: MatchingWeights,
        authorizer: Arc<dyn AuthorizationCheck>,
    ) -> Result<Self, MatchError> {
        validate_weights(&defaults)?;
        Ok(Self {
            current: ArcSwap::from_pointee(WeightSnapshot {
                weights: defaults,
                state: WeightState::Default,
            }),
            defaults,
            authorizer,
        })
    }

    pub fn with_default_weights(authorizer: Arc<dyn AuthorizationCheck>) -> Self {
        Self {
            current: ArcSwap::from_pointee(WeightSnapshot {
                weights: MatchingWeights::default(),
                state: WeightState::Default,
            }),
            defaults: MatchingWeights::default(),
            authorizer,
        }
    }

    /// Current weights
    pub fn weights(&self) -> MatchingWeights {
        self.current.load().weights
    }

    pub fn state(&self) -> WeightState {
        self.current.load().state
    }

    /// Replace the weights for every subsequent scoring call
    pub fn update_weights(
        &self,
        caller_id: &str,
        weights: MatchingWeights,
    ) -> Result<(), MatchError> {
        self.authorize(caller_id)?;
        validate_weights(&weights)?;

        self.current.store(Arc::new(WeightSnapshot {
            weights,
            state: WeightState::Custom,
        }));

        tracing::info!("Scoring weights updated by {}: {:?}", caller_id, weights);
        Ok(())
    }

    /// Restore the configured defaults
    pub fn reset_to_default(&self, caller_id: &str) -> Result<(), MatchError> {
        self.authorize(caller_id)?;

        self.current.store(Arc::new(WeightSnapshot {
            weights: self.defaults,
            state: WeightState::Default,
        }));

        tracing::info!("Scoring weights reset to defaults by {}", caller_id);
        Ok(())
    }

    fn authorize(&self, caller_id: &str) -> Result<(), MatchError> {
        if self.authorizer.is_authorized_to_update_weights(caller_id) {
            Ok(())
        } else {
            tracing::warn!("Rejected weight change from unauthorized caller {:?}", caller_id);
            Err(MatchError::PermissionDenied(
                "only administrators may change matching weights".to_string(),
            ))
        }
    }
}

impl std::fmt::Debug for WeightManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("WeightManager")
            .field("weights", &snapshot.weights)
            .field("state", &snapshot.state)
            .finish()
    }
}

/// Non-negative, finite, summing to 1.0 within tolerance
pub fn validate_weights(weights: &MatchingWeights) -> Result<(), MatchError> {
    if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(MatchError::InvalidArgument(
            "weights must be finite and non-negative".to_string(),
        ));
    }

    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(MatchError::InvalidArgument(format!(
            "weights must sum to 1.0, got {:.4}",
            sum
        )));
    }

    Ok(())
}
