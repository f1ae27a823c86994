use thiserror::Error;
use crate::core::repository::RepositoryError;

/// Errors returned by the matching engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Not implemented: {0}")]
    Unimplemented(String),
}

impl From<RepositoryError> for MatchError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => MatchError::NotFound(what),
            RepositoryError::Backend(msg) => MatchError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let not_found: MatchError = RepositoryError::NotFound("casting c1".to_string()).into();
        assert_eq!(not_found, MatchError::NotFound("casting c1".to_string()));

        let backend: MatchError = RepositoryError::Backend("timeout".to_string()).into();
        assert!(matches!(backend, MatchError::Internal(msg) if msg == "timeout"));
    }
}
