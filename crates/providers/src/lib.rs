//! Remote chat-completion providers.
//!
//! A provider turns a list of wire messages into one reply string. Every
//! way that can go wrong is reported as a [`CompletionError`], which in turn
//! collapses into one of four [`FailureKind`]s for logging.

pub mod openai;

use async_trait::async_trait;
use shared::agent_api::ChatMessage;
use std::fmt;
use std::time::Duration;

/// Coarse failure classes used for log fields and metering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No usable credential was configured.
    Credential,
    /// Connection, TLS, or timeout problems.
    Network,
    /// The server answered with a non-success status.
    Status,
    /// The body did not have the expected shape.
    Shape,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Credential => "credential",
            FailureKind::Network => "network",
            FailureKind::Status => "status",
            FailureKind::Shape => "shape",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("no usable API credential configured")]
    MissingCredential,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned status {status}")]
    Status { status: u16, detail: String },

    #[error("malformed completion payload: {0}")]
    MalformedPayload(String),
}

impl CompletionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionError::MissingCredential => FailureKind::Credential,
            CompletionError::Transport(_) | CompletionError::Timeout(_) => FailureKind::Network,
            CompletionError::Status { .. } => FailureKind::Status,
            CompletionError::MalformedPayload(_) => FailureKind::Shape,
        }
    }
}

/// Something that can answer a chat-completion request.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Send `messages` and return the first choice's text.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_has_one_kind() {
        assert_eq!(
            CompletionError::MissingCredential.kind(),
            FailureKind::Credential
        );
        assert_eq!(
            CompletionError::Transport("reset".into()).kind(),
            FailureKind::Network
        );
        assert_eq!(
            CompletionError::Timeout(Duration::from_secs(10)).kind(),
            FailureKind::Network
        );
        assert_eq!(
            CompletionError::Status {
                status: 429,
                detail: String::new()
            }
            .kind(),
            FailureKind::Status
        );
        assert_eq!(
            CompletionError::MalformedPayload("no choices".into()).kind(),
            FailureKind::Shape
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FailureKind::Shape.to_string(), "shape");
        assert_eq!(FailureKind::Credential.as_str(), "credential");
    }
}
