use thiserror::Error;

/// Failure reported by a state use case. The HTTP layer does not distinguish
/// the variants; both surface as an internal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractorError {
    #[error("state rejected: {0}")]
    Rejected(String),
    #[error("state backend unavailable: {0}")]
    Unavailable(String),
}

impl InteractorError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
