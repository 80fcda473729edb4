use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-issued quiz identifier.
///
/// The client never interprets it; it is echoed back on submit in the same
/// JSON form the server used (the reference backend hands out integers).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(Repr);

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(i64),
    Text(String),
}

impl QuizId {
    #[must_use]
    pub fn numeric(id: i64) -> Self {
        Self(Repr::Number(id))
    }

    #[must_use]
    pub fn text(id: impl Into<String>) -> Self {
        Self(Repr::Text(id.into()))
    }
}

impl fmt::Debug for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuizId({self})")
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Number(id) => write!(f, "{id}"),
            Repr::Text(id) => f.write_str(id),
        }
    }
}
