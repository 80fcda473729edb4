use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Level sent with every chat message unless configured otherwise.
pub const DEFAULT_STUDENT_LEVEL: &str = "lycée";

/// Assistant text shown in place of a reply when the send fails.
///
/// It only exists in the view; server-side history is left untouched.
pub const CHAT_FALLBACK_REPLY: &str =
    "❌ Désolé, une erreur s'est produite. Vérifie que le serveur est bien démarré.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the server-side history, as fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A message as rendered in the chat view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    #[must_use]
    pub fn role(&self) -> ChatRole {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
