//! Intent responder for the Lectern portfolio assistant.
//!
//! Classifies visitor messages into a fixed set of intents, answers from a
//! keyword-scored knowledge base or canned content blocks, and keeps a
//! per-session conversation log. No language model is involved.

pub mod actions;
pub mod classifier;
pub mod context;
pub mod error;
pub mod history;
pub mod knowledge;
pub mod personality;
pub mod responder;
pub mod session;

pub use actions::{ActionDispatcher, ActionOutcome, Navigator, RecordingNavigator};
pub use classifier::{Classification, IntentClassifier};
pub use context::{AssistantStats, ConversationLog};
pub use error::AssistantError;
pub use history::{HistoryStore, JsonFileHistory, MemoryHistory};
pub use knowledge::{relevance_score, KnowledgeBase, TopicEntry, TopicMatch};
pub use personality::{Personality, PersonalityProfile};
pub use responder::{action_button, welcome_message, AssistantResponse, Responder};
pub use session::{AssistantSession, PendingReply, SessionOptions, ThinkingDelay};
