//! Transcript message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::User => "user",
            Origin::Assistant => "assistant",
        }
    }
}

/// Position of a message in its transcript. Ids only ever increase, so the
/// largest id is always the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// A single transcript entry. Fields are private so a message cannot be
/// edited after it has been appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    origin: Origin,
    text: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id,
            origin,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Format timestamp for display
    pub fn formatted_time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}
