use thiserror::Error;
use wardencore::error::BackendError;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The item queried does not exist.
    #[error("unknown item: {0}")]
    UnknownItem(String),
    /// A mutation named an item that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("duplicate item: {0}")]
    DuplicateItem(String),
    #[error("duplicate item child: {0} -> {1}")]
    DuplicateEdge(String, String),
    #[error("item child not found: {0} -> {1}")]
    EdgeNotFound(String, String),
    #[error("assignment not found: user {0} has no role {1}")]
    AssignmentNotFound(String, String),
    /// Adding `{0} -> {1}` would close a cycle, as `{1}` already grants
    /// `{0}` (or the two are the same item).
    #[error("cycle detected: {1} already grants {0}")]
    CycleDetected(String, String),
    #[error("rule {0} is referenced by items {1:?}")]
    RuleInUse(String, Vec<String>),
    #[error(transparent)]
    Rule(#[from] wardenrule::error::Error),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("cancelled")]
    Cancelled,
    #[error("builder error: {0}")]
    Builder(&'static str),
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::InvalidReference(name) => Error::InvalidReference(name),
            BackendError::DuplicateItem(name) => Error::DuplicateItem(name),
            BackendError::DuplicateEdge(parent, child) => Error::DuplicateEdge(parent, child),
            BackendError::AssignmentNotFound(user_id, role) =>
                Error::AssignmentNotFound(user_id, role),
            BackendError::Unavailable(msg) => Error::BackendUnavailable(msg),
            e => Error::BackendUnavailable(e.to_string()),
        }
    }
}
