//! One chat session: an append-only transcript and a pending flag.
//!
//! A turn goes Idle -> Pending -> Idle. `begin_turn` hands out a
//! [`PendingTurn`] which is the only way to finish the turn, and it is
//! consumed by `complete_turn`, so every accepted submission produces
//! exactly one assistant message.

use shared::chat::{Message, MessageId, Origin};

/// Proof that a user message is waiting for its reply.
#[derive(Debug)]
pub struct PendingTurn {
    utterance: String,
    user_message: MessageId,
}

impl PendingTurn {
    /// The trimmed text the user submitted.
    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn user_message(&self) -> MessageId {
        self.user_message
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<Message>,
    pending: bool,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose transcript opens with an assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.push(Origin::Assistant, greeting.into());
        session
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Id of the newest message, for scroll-to-bottom.
    pub fn last_message_id(&self) -> Option<MessageId> {
        self.transcript.last().map(|m| m.id())
    }

    /// Accept a user submission.
    ///
    /// Returns `None` and leaves the session untouched when the text is
    /// blank or another turn is still pending.
    pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
        let utterance = text.trim();
        if utterance.is_empty() || self.pending {
            return None;
        }
        let user_message = self.push(Origin::User, utterance.to_string());
        self.pending = true;
        Some(PendingTurn {
            utterance: utterance.to_string(),
            user_message,
        })
    }

    /// Append the assistant reply for `turn` and return to idle.
    pub fn complete_turn(&mut self, turn: PendingTurn, reply: impl Into<String>) -> MessageId {
        debug_assert!(self.pending, "turn completed while idle");
        tracing::debug!(user_message = turn.user_message.0, "turn completed");
        let id = self.push(Origin::Assistant, reply.into());
        self.pending = false;
        id
    }

    fn push(&mut self, origin: Origin, text: String) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.transcript.push(Message::new(id, origin, text));
        id
    }
}
