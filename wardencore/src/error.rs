use thiserror::Error;

/// The error kinds every backend must surface; backend-native failures
/// are folded into `Unavailable` so the engine never has to interpret
/// them.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("duplicate item: {0}")]
    DuplicateItem(String),
    #[error("duplicate item child: {0} -> {1}")]
    DuplicateEdge(String, String),
    #[error("assignment not found: user {0} has no role {1}")]
    AssignmentNotFound(String, String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// Denotes custom application invariant; generally informative.
    #[error("application invariant violated: {0}")]
    AppInvariantViolation(String),
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("unsupported value: {0}")]
    Unsupported(String),
}
