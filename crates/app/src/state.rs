use crate::animation::{AnimationLoop, FRAME_INTERVAL};
use crate::particles::ParticleField;
use crate::sphere::{SceneGraph, SceneRenderer};
use crate::widgets::{FileFilter, FilePickerWidget};
use chat_engine::{ChatEngine, ChatSession, PendingTurn};
use eframe::egui;
use services::{ContactForm, ProjectStore};
use shared::chat::MessageId;
use shared::profile::Profile;
use shared::settings::AppSettings;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Page sections reachable from navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Projects,
    Journey,
    Contact,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Hero,
            Section::Projects,
            Section::Journey,
            Section::Contact,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Projects => "Project Lab",
            Section::Journey => "Journey",
            Section::Contact => "Contact",
        }
    }
}

/// A submitted turn whose reply is being produced off the UI thread.
struct InFlight {
    turn: PendingTurn,
    rx: Receiver<String>,
}

pub struct AppState {
    pub settings: AppSettings,
    pub profile: Profile,
    pub store: ProjectStore,
    engine: Arc<ChatEngine>,
    pub session: ChatSession,
    pub chat_input: String,
    in_flight: Option<InFlight>,
    pub scroll_to_message: Option<MessageId>,
    pub scroll_to_project: Option<u32>,
    pub scroll_to_section: Option<Section>,
    pub contact: ContactForm,
    pub contact_status: Option<Result<String, String>>,
    pub particles: ParticleField,
    pub scene: SceneRenderer,
    animation: Option<AnimationLoop>,
    paused_at: Duration,
    ctx: Option<egui::Context>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        let profile = Profile::seed();
        let engine = ChatEngine::from_settings(profile.clone(), &settings.model);
        Self::with_engine(settings, profile, engine)
    }

    pub fn with_engine(settings: AppSettings, profile: Profile, engine: ChatEngine) -> Self {
        let store = ProjectStore::new(profile.projects.clone());
        let session = engine.new_session();
        Self {
            settings,
            profile,
            store,
            engine: Arc::new(engine),
            session,
            chat_input: String::new(),
            in_flight: None,
            scroll_to_message: None,
            scroll_to_project: None,
            scroll_to_section: None,
            contact: ContactForm::default(),
            contact_status: None,
            particles: ParticleField::new(egui::vec2(800.0, 320.0)),
            scene: SceneRenderer::new(SceneGraph::hero()),
            animation: None,
            paused_at: Duration::ZERO,
            ctx: None,
        }
    }

    /// Hook up the UI context. Starts the animation loop when enabled.
    pub fn attach_context(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
        if self.settings.animations_enabled {
            self.start_animation();
        }
    }

    pub fn has_remote_assistant(&self) -> bool {
        self.engine.has_remote()
    }

    // -- chat -----------------------------------------------------------

    /// Submit `chat_input` as a user turn. The input is kept when the
    /// submission is rejected (blank or a reply still pending).
    pub fn submit_chat(&mut self) -> bool {
        let text = std::mem::take(&mut self.chat_input);
        let Some(turn) = self.session.begin_turn(&text) else {
            self.chat_input = text;
            return false;
        };
        self.scroll_to_message = Some(turn.user_message());

        let (tx, rx) = mpsc::channel();
        let engine = Arc::clone(&self.engine);
        let store = self.store.clone();
        let utterance = turn.utterance().to_string();
        let repaint = self.ctx.clone();
        std::thread::spawn(move || run_chat_turn(engine, store, utterance, tx, repaint));

        self.in_flight = Some(InFlight { turn, rx });
        true
    }

    /// Submit a canned prompt, replacing whatever was typed.
    pub fn submit_prompt(&mut self, prompt: &str) -> bool {
        if self.session.is_pending() {
            return false;
        }
        self.chat_input = prompt.to_string();
        self.submit_chat()
    }

    /// Non-blocking check for the reply to the pending turn.
    pub fn poll_chat_reply(&mut self) {
        let Some(in_flight) = &self.in_flight else {
            return;
        };
        let text = match in_flight.rx.try_recv() {
            Ok(text) => text,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("chat worker exited without a reply, answering locally");
                self.engine
                    .fallback_reply(in_flight.turn.utterance(), &self.store)
            }
        };
        if let Some(in_flight) = self.in_flight.take() {
            let id = self.session.complete_turn(in_flight.turn, text);
            self.scroll_to_message = Some(id);
        }
    }

    // -- animation ------------------------------------------------------

    /// Clock driving the hero visuals. Frozen while paused.
    pub fn animation_time(&self) -> Duration {
        self.animation
            .as_ref()
            .map(|a| a.elapsed())
            .unwrap_or(self.paused_at)
    }

    pub fn animation_running(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_running())
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.settings.animations_enabled = enabled;
        if enabled {
            self.start_animation();
        } else {
            self.stop_animation();
        }
    }

    fn start_animation(&mut self) {
        if self.animation.is_some() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else {
            return;
        };
        tracing::debug!(offset_ms = self.paused_at.as_millis() as u64, "animation started");
        self.animation = Some(AnimationLoop::start(
            FRAME_INTERVAL,
            self.paused_at,
            move || ctx.request_repaint(),
        ));
    }

    fn stop_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            self.paused_at = animation.elapsed();
            animation.stop();
            tracing::debug!(at_ms = self.paused_at.as_millis() as u64, "animation paused");
        }
    }

    // -- projects -------------------------------------------------------

    /// Ask for a demo file and record its name on project `id`.
    pub fn attach_demo_from_picker(&mut self, id: u32) {
        let picker = FilePickerWidget::new()
            .with_title("Attach demo")
            .with_filter(FileFilter::demo_media())
            .with_filter(FileFilter::all_files());
        match picker.pick_display_name() {
            Some(name) => {
                tracing::info!(project = id, file = %name, "demo attached");
                self.store.attach_demo(id, name);
            }
            None => tracing::debug!(project = id, "demo picker cancelled"),
        }
    }

    pub fn focus_project(&mut self, id: u32) {
        self.scroll_to_project = Some(id);
    }

    // -- contact --------------------------------------------------------

    pub fn submit_contact(&mut self) {
        self.contact_status = Some(match self.contact.submit() {
            Ok(ack) => {
                self.contact.clear();
                Ok(ack.text)
            }
            Err(e) => Err(e.to_string()),
        });
    }
}

/// Worker body: produce one reply and hand it back to the UI thread.
fn run_chat_turn(
    engine: Arc<ChatEngine>,
    store: ProjectStore,
    utterance: String,
    tx: Sender<String>,
    repaint: Option<egui::Context>,
) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            // Dropping `tx` tells the UI to answer locally.
            tracing::warn!(error = %e, "failed to start async runtime");
            return;
        }
    };

    let reply = rt.block_on(engine.respond(&utterance, &store));
    tracing::debug!(source = ?reply.source, "reply ready");
    let _ = tx.send(reply.text);

    if let Some(ctx) = repaint {
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::chat::Origin;
    use std::time::Instant;

    fn local_state() -> AppState {
        let settings = AppSettings {
            animations_enabled: false,
            ..AppSettings::default()
        };
        let profile = Profile::seed();
        let engine = ChatEngine::new(profile.clone(), None);
        AppState::with_engine(settings, profile, engine)
    }

    fn wait_for_reply(state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.session.is_pending() && Instant::now() < deadline {
            state.poll_chat_reply();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_chat_turn_completes_off_thread() {
        let mut state = local_state();
        state.chat_input = "Tell me about TrackBot".into();

        assert!(state.submit_chat());
        assert!(state.chat_input.is_empty());
        assert!(state.session.is_pending());

        wait_for_reply(&mut state);

        let transcript = state.session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].origin(), Origin::Assistant);
        assert!(transcript[2].text().contains("MQTT"));
        assert_eq!(state.scroll_to_message, Some(transcript[2].id()));
    }

    #[test]
    fn test_rejected_submission_keeps_draft() {
        let mut state = local_state();
        state.chat_input = "   ".into();
        assert!(!state.submit_chat());
        assert_eq!(state.session.transcript().len(), 1);

        state.chat_input = "first".into();
        assert!(state.submit_chat());
        state.chat_input = "second".into();
        assert!(!state.submit_chat());
        assert_eq!(state.chat_input, "second");

        wait_for_reply(&mut state);
        assert_eq!(state.session.transcript().len(), 3);
    }

    #[test]
    fn test_quick_prompt_uses_renamed_project() {
        let mut state = local_state();
        state
            .store
            .update(1, shared::project::ProjectPatch::title("Deepfake Lab"));

        assert!(state.submit_prompt("What projects have you built?"));
        wait_for_reply(&mut state);

        let last = state.session.transcript().last().unwrap();
        assert!(last.text().contains("Deepfake Lab"));
    }

    #[test]
    fn test_contact_submission_status() {
        let mut state = local_state();
        state.submit_contact();
        assert!(matches!(state.contact_status, Some(Err(_))));

        state.contact = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        };
        state.submit_contact();
        assert!(matches!(state.contact_status, Some(Ok(ref t)) if t.contains("Ada")));
        assert!(state.contact.name.is_empty());
    }

    #[test]
    fn test_animation_toggle_pauses_clock() {
        let mut state = local_state();
        state.attach_context(egui::Context::default());
        assert!(!state.animation_running());

        state.set_animations_enabled(true);
        assert!(state.animation_running());
        std::thread::sleep(Duration::from_millis(30));

        state.set_animations_enabled(false);
        assert!(!state.animation_running());
        let frozen = state.animation_time();
        assert!(frozen >= Duration::from_millis(30));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(state.animation_time(), frozen);

        state.set_animations_enabled(true);
        assert!(state.animation_time() >= frozen);
    }

    #[test]
    fn test_focus_project_requests_scroll() {
        let mut state = local_state();
        state.focus_project(3);
        assert_eq!(state.scroll_to_project, Some(3));
    }
}
