#[non_exhaustive]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("rule not found: {0}")]
    NotFound(String),
    #[error("rule {0} failed to evaluate: {1}")]
    Evaluation(String, String),
}
