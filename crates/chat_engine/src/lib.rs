//! Chat engine - the portfolio assistant behind the chat dock
//!
//! This crate provides:
//! - The static knowledge table describing the portfolio owner
//! - A deterministic keyword responder used when no remote model answers
//! - The system instruction sent with every remote request
//! - Session state (transcript + pending flag) and the remote-first engine

pub mod engine;
pub mod fallback;
pub mod knowledge;
pub mod prompts;
pub mod session;

pub use engine::{ChatEngine, Reply, ReplySource};
pub use fallback::{FallbackResponder, Topic};
pub use knowledge::{KnowledgeTable, ProjectTopic, KNOWLEDGE};
pub use prompts::build_system_prompt;
pub use session::{ChatSession, PendingTurn};
