//! Collaborator contracts the engine is implemented against.
//!
//! Production implementations live in `crate::services`; tests use in-memory
//! fakes.

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;
use crate::core::criteria::Criteria;
use crate::models::{Candidate, Casting, MatchResult};

/// Errors reported by collaborators
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Backend failure: {0}")]
    Backend(String),
}

/// One page of retrieved candidates
#[derive(Debug, Clone, Default)]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    pub total: u64,
}

/// Paged, filterable read of model profiles
#[async_trait]
pub trait CandidateRetriever: Send + Sync {
    async fn search(
        &self,
        criteria: &Criteria,
        page: u32,
        page_size: u32,
        public_only: bool,
    ) -> Result<CandidatePage, RepositoryError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fails with `RepositoryError::NotFound` when the model does not exist
    async fn find_model(&self, id: &str) -> Result<Candidate, RepositoryError>;
}

#[async_trait]
pub trait PostingRepository: Send + Sync {
    /// Fails with `RepositoryError::NotFound` when the casting does not exist
    async fn find_casting(&self, id: &str) -> Result<Casting, RepositoryError>;
}

/// Role check guarding weight updates
pub trait AuthorizationCheck: Send + Sync {
    fn is_authorized_to_update_weights(&self, caller_id: &str) -> bool;
}

/// Delivery of "you are a top match" notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_top_matches(
        &self,
        casting: &Casting,
        matches: &[MatchResult],
    ) -> Result<(), RepositoryError>;
}

/// Authorizes a fixed set of administrator ids
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    admins: HashSet<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthorizationCheck for AdminAllowList {
    fn is_authorized_to_update_weights(&self, caller_id: &str) -> bool {
        !caller_id.is_empty() && self.admins.contains(caller_id)
    }
}
