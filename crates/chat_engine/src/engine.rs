//! Remote-first reply engine.
//!
//! Each utterance gets one remote attempt. Any failure, including having no
//! credential at all, is logged with its [`FailureKind`] and answered by the
//! local [`FallbackResponder`] instead. Callers always get text back.

use providers::openai::OpenAIClient;
use providers::{CompletionBackend, CompletionError, FailureKind};
use services::ProjectStore;
use shared::agent_api::ChatMessage;
use shared::chat::MessageId;
use shared::profile::Profile;
use shared::settings::ModelProvider;
use std::sync::Arc;
use std::time::Duration;

use crate::fallback::FallbackResponder;
use crate::prompts::build_system_prompt;
use crate::session::ChatSession;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a reply came from. Not shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback { reason: FailureKind },
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct ChatEngine {
    backend: Option<Arc<dyn CompletionBackend>>,
    fallback: FallbackResponder,
    system_prompt: String,
    greeting: String,
    request_timeout: Duration,
}

impl ChatEngine {
    pub fn new(profile: Profile, backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        let greeting = format!(
            "Hi 👋 I'm {}'s professional AI assistant. Ask me about his projects, skills, or \
             technical expertise. I only discuss professional topics.",
            profile.first_name()
        );
        Self {
            backend,
            system_prompt: build_system_prompt(&profile),
            fallback: FallbackResponder::new(profile),
            greeting,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Engine backed by the OpenAI client when a usable key is configured,
    /// local-only otherwise.
    pub fn from_settings(profile: Profile, settings: &ModelProvider) -> Self {
        let backend: Option<Arc<dyn CompletionBackend>> =
            match OpenAIClient::from_settings(settings) {
                Ok(client) => {
                    tracing::info!(model = client.model(), "remote completions enabled");
                    Some(Arc::new(client) as Arc<dyn CompletionBackend>)
                }
                Err(e) => {
                    tracing::info!(reason = %e.kind(), "remote completions disabled: {}", e);
                    None
                }
            };
        Self::new(profile, backend)
            .with_request_timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn has_remote(&self) -> bool {
        self.backend.is_some()
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Fresh session opening with the assistant greeting.
    pub fn new_session(&self) -> ChatSession {
        ChatSession::with_greeting(self.greeting.clone())
    }

    /// Produce one reply for `utterance`.
    pub async fn respond(&self, utterance: &str, store: &ProjectStore) -> Reply {
        match self.try_remote(utterance).await {
            Ok(text) => Reply {
                text,
                source: ReplySource::Remote,
            },
            Err(err) => {
                let reason = err.kind();
                if reason == FailureKind::Credential {
                    tracing::info!(reason = %reason, "no credential, answering locally");
                } else {
                    tracing::warn!(reason = %reason, error = %err, "remote completion failed, answering locally");
                }
                Reply {
                    text: self.fallback_reply(utterance, store),
                    source: ReplySource::Fallback { reason },
                }
            }
        }
    }

    /// The local answer, without touching the network.
    pub fn fallback_reply(&self, utterance: &str, store: &ProjectStore) -> String {
        self.fallback.respond(utterance, store)
    }

    /// Run a full turn on `session`. Returns the assistant message id, or
    /// `None` when the submission was rejected.
    pub async fn submit(
        &self,
        session: &mut ChatSession,
        store: &ProjectStore,
        text: &str,
    ) -> Option<MessageId> {
        let turn = session.begin_turn(text)?;
        let reply = self.respond(turn.utterance(), store).await;
        Some(session.complete_turn(turn, reply.text))
    }

    async fn try_remote(&self, utterance: &str) -> Result<String, CompletionError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(CompletionError::MissingCredential)?;
        let messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(utterance),
        ];
        tracing::debug!(provider = backend.name(), "requesting remote completion");
        match tokio::time::timeout(self.request_timeout, backend.complete(messages)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(CompletionError::Timeout(self.request_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::chat::Origin;
    use shared::project::ProjectPatch;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Behaviour {
        Answer(&'static str),
        Fail(fn() -> CompletionError),
        Hang,
    }

    struct FakeBackend {
        behaviour: Behaviour,
        calls: AtomicUsize,
        last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl FakeBackend {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
                last_messages: Default::default(),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for FakeBackend {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages;
            match &self.behaviour {
                Behaviour::Answer(text) => Ok(text.to_string()),
                Behaviour::Fail(make) => Err(make()),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".into())
                }
            }
        }
    }

    fn store() -> ProjectStore {
        ProjectStore::new(Profile::seed().projects)
    }

    fn engine_with(backend: Option<Arc<FakeBackend>>) -> ChatEngine {
        let backend = backend.map(|b| b as Arc<dyn CompletionBackend>);
        ChatEngine::new(Profile::seed(), backend)
    }

    #[tokio::test]
    async fn test_remote_reply_is_used_verbatim() {
        let backend = FakeBackend::new(Behaviour::Answer("  Remote says hi  "));
        let engine = engine_with(Some(backend.clone()));

        let reply = engine.respond("Tell me about TrackBot", &store()).await;
        assert_eq!(reply.text, "  Remote says hi  ");
        assert_eq!(reply.source, ReplySource::Remote);

        let sent = backend.last_messages.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].role, "system");
        assert!(sent[0].content.contains("STRICT RULES"));
        assert_eq!(sent[1].role, "user");
        assert_eq!(sent[1].content, "Tell me about TrackBot");
    }

    #[tokio::test]
    async fn test_no_backend_goes_straight_to_fallback() {
        let engine = engine_with(None);
        assert!(!engine.has_remote());

        let reply = engine.respond("Tell me about TrackBot", &store()).await;
        assert_eq!(
            reply.source,
            ReplySource::Fallback {
                reason: FailureKind::Credential
            }
        );
        for needle in ["ultrasonic", "vibration", "Raspberry Pi", "MQTT"] {
            assert!(reply.text.contains(needle));
        }
    }

    #[tokio::test]
    async fn test_each_failure_kind_falls_back() {
        let cases: [(fn() -> CompletionError, FailureKind); 3] = [
            (|| CompletionError::Transport("reset".into()), FailureKind::Network),
            (
                || CompletionError::Status {
                    status: 401,
                    detail: "bad key".into(),
                },
                FailureKind::Status,
            ),
            (
                || CompletionError::MalformedPayload("no choices".into()),
                FailureKind::Shape,
            ),
        ];

        for (make, kind) in cases {
            let backend = FakeBackend::new(Behaviour::Fail(make));
            let engine = engine_with(Some(backend.clone()));
            let reply = engine.respond("what is your girlfriend's name", &store()).await;

            assert_eq!(reply.source, ReplySource::Fallback { reason: kind });
            assert!(reply.text.starts_with("I can only discuss"));
            assert_eq!(backend.calls.load(Ordering::SeqCst), 1, "single attempt, no retry");
        }
    }

    #[tokio::test]
    async fn test_hanging_backend_times_out_into_fallback() {
        let backend = FakeBackend::new(Behaviour::Hang);
        let engine = engine_with(Some(backend)).with_request_timeout(Duration::from_millis(50));

        let reply = engine.respond("How can I contact Kaustav?", &store()).await;
        assert_eq!(
            reply.source,
            ReplySource::Fallback {
                reason: FailureKind::Network
            }
        );
        assert!(reply.text.contains("LinkedIn"));
    }

    #[tokio::test]
    async fn test_submit_appends_exactly_one_reply() {
        let engine = engine_with(None);
        let mut session = engine.new_session();
        let store = store();

        let id = engine.submit(&mut session, &store, "hello").await;

        assert!(id.is_some());
        assert!(!session.is_pending());
        let origins: Vec<Origin> = session.transcript().iter().map(|m| m.origin()).collect();
        assert_eq!(origins, vec![Origin::Assistant, Origin::User, Origin::Assistant]);
        assert_eq!(session.last_message_id(), id);
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_text() {
        let backend = FakeBackend::new(Behaviour::Answer("unused"));
        let engine = engine_with(Some(backend.clone()));
        let mut session = engine.new_session();

        assert_eq!(engine.submit(&mut session, &store(), "   ").await, None);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_lists_renamed_project() {
        let engine = engine_with(None);
        let mut session = engine.new_session();
        let mut store = store();
        store.update(1, ProjectPatch::title("X"));

        engine
            .submit(&mut session, &store, "tell me about your projects")
            .await;

        let last = session.transcript().last().unwrap();
        assert_eq!(last.origin(), Origin::Assistant);
        assert!(last.text().contains("X, TrackBot"));
    }

    #[test]
    fn test_missing_key_in_settings_disables_remote() {
        let settings = ModelProvider {
            openai_auth: shared::settings::ProviderAuth {
                api_key: Some(shared::settings::PLACEHOLDER_API_KEY.into()),
            },
            ..ModelProvider::default()
        };
        // Only meaningful when the environment does not provide a key either.
        if std::env::var("OPENAI_API_KEY").is_err() {
            let engine = ChatEngine::from_settings(Profile::seed(), &settings);
            assert!(!engine.has_remote());
        }
    }

    #[test]
    fn test_greeting_opens_session() {
        let engine = engine_with(None);
        let session = engine.new_session();
        assert_eq!(session.transcript().len(), 1);
        assert!(session.transcript()[0].text().contains("Kaustav's professional AI assistant"));
    }
}
