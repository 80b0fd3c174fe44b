use thiserror::Error;

/// Failure kinds a repository can report, independent of the backing store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    /// A conditional update matched zero rows.
    #[error("no matching row found")]
    NoMatch,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
