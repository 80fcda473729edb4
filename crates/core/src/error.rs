use thiserror::Error;

/// Input problems caught before anything reaches the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationFailure {
    #[error("Veuillez entrer un sujet pour le quiz")]
    EmptyTopic,

    /// `index` is zero-based; the message names the question one-based.
    #[error("Veuillez répondre à la question {}", .index + 1)]
    Unanswered { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subject: {raw}")]
pub struct UnknownSubject {
    pub raw: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {raw}")]
pub struct UnknownDifficulty {
    pub raw: String,
}

/// A failed request as seen by the store.
///
/// Transport details stay in the services crate; the store only needs
/// something to log and compare.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FailureNotice {
    message: String,
}

impl FailureNotice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_message_is_one_based() {
        let err = ValidationFailure::Unanswered { index: 1 };
        assert_eq!(err.to_string(), "Veuillez répondre à la question 2");
    }
}
