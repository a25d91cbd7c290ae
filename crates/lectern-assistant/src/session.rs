//! Session orchestration: the single entry point a host talks to.
//!
//! Wires classifier, responder, action dispatcher, conversation log and
//! history store together. One session is driven by one event loop; nothing
//! here is shared across sessions.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lectern_core::config::AssistantConfig;
use lectern_core::{ActionId, ConversationTurn, IntentCategory, TurnKind};

use crate::actions::{ActionDispatcher, ActionOutcome, Navigator};
use crate::classifier::IntentClassifier;
use crate::context::{AssistantStats, ConversationLog};
use crate::error::AssistantError;
use crate::history::HistoryStore;
use crate::personality::Personality;
use crate::responder::{welcome_message, AssistantResponse, Responder};

// =============================================================================
// Options
// =============================================================================

/// Range of the cosmetic pause before a reply is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    pub min: Duration,
    pub max: Duration,
}

impl ThinkingDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Uniform draw from `[min, max]`. An inverted range yields `min`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rng.random_range(min_ms..=max_ms))
    }
}

/// Session tuning, usually derived from `[assistant]` config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub personality: Personality,
    pub context_turns: usize,
    pub max_message_chars: usize,
    pub thinking_delay: ThinkingDelay,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&AssistantConfig::default())
    }
}

impl From<&AssistantConfig> for SessionOptions {
    fn from(config: &AssistantConfig) -> Self {
        let personality = config.personality.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default personality");
            Personality::default()
        });
        Self {
            personality,
            context_turns: config.context_turns,
            max_message_chars: config.max_message_chars,
            thinking_delay: ThinkingDelay::new(
                Duration::from_millis(config.thinking_delay_min_ms),
                Duration::from_millis(config.thinking_delay_max_ms),
            ),
        }
    }
}

// =============================================================================
// PendingReply
// =============================================================================

/// A reply that has been generated but not yet shown.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub response: AssistantResponse,
    /// Category the classifier chose for the input.
    pub classified_as: IntentCategory,
    pub delay: Duration,
}

// =============================================================================
// AssistantSession
// =============================================================================

/// One user's conversation with the assistant.
pub struct AssistantSession {
    id: Uuid,
    classifier: IntentClassifier,
    responder: Responder,
    dispatcher: ActionDispatcher,
    log: ConversationLog,
    store: Box<dyn HistoryStore>,
    rng: StdRng,
    options: SessionOptions,
}

impl AssistantSession {
    /// Start a session, restoring saved history when the store has any.
    ///
    /// A session that starts empty opens with the welcome message.
    pub fn new(responder: Responder, store: Box<dyn HistoryStore>, options: SessionOptions) -> Self {
        let log = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not restore conversation history");
            ConversationLog::new()
        });
        let restored = log.len();

        let mut session = Self {
            id: Uuid::new_v4(),
            classifier: IntentClassifier::new(),
            responder: responder.with_personality(options.personality),
            dispatcher: ActionDispatcher::new(),
            log,
            store,
            rng: StdRng::from_os_rng(),
            options,
        };

        if session.log.is_empty() {
            session.push_welcome();
        }

        info!(
            session_id = %session.id,
            restored_turns = restored,
            topics = session.responder.knowledge().len(),
            personality = %session.responder.personality(),
            "Assistant session started"
        );
        session
    }

    /// Replace the RNG with a seeded one for reproducible picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn personality(&self) -> Personality {
        self.responder.personality()
    }

    // -----------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------

    /// Accept user input and prepare the reply.
    ///
    /// Blank input is a no-op and returns `None`. Otherwise the user turn is
    /// logged immediately and the reply waits for [`deliver`](Self::deliver)
    /// or [`commit`](Self::commit).
    pub fn submit(&mut self, raw: &str) -> Option<PendingReply> {
        let message = self.normalize(raw)?;

        self.log.push(ConversationTurn::user(message.clone()));
        self.persist();

        let classification = self.classifier.analyze(&message);
        debug!(
            category = %classification.category,
            confidence = classification.confidence,
            "Message classified"
        );

        let response = self
            .responder
            .respond(&message, classification.category, &mut self.rng);
        let delay = self.options.thinking_delay.draw(&mut self.rng);

        Some(PendingReply {
            response,
            classified_as: classification.category,
            delay,
        })
    }

    /// Show a pending reply after its thinking delay.
    ///
    /// If `shutdown` becomes `true` (or its sender is dropped) before the
    /// delay elapses, the reply is discarded and nothing is logged.
    pub async fn deliver(
        &mut self,
        pending: PendingReply,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Option<&ConversationTurn> {
        let cancelled = tokio::select! {
            _ = tokio::time::sleep(pending.delay) => false,
            _ = wait_for_shutdown(shutdown) => true,
        };

        if cancelled {
            debug!(session_id = %self.id, "Session closed while thinking, reply discarded");
            return None;
        }
        Some(self.commit(pending.response))
    }

    /// Append an assistant reply to the log and persist.
    pub fn commit(&mut self, response: AssistantResponse) -> &ConversationTurn {
        let index = self.log.len();
        self.log
            .push(ConversationTurn::assistant(response.content, response.kind));
        self.persist();
        &self.log.turns()[index]
    }

    /// Submit and commit in one step, skipping the thinking delay.
    pub fn handle_message(&mut self, raw: &str) -> Option<AssistantResponse> {
        let pending = self.submit(raw)?;
        let response = pending.response.clone();
        self.commit(pending.response);
        Some(response)
    }

    // -----------------------------------------------------------------
    // Actions and settings
    // -----------------------------------------------------------------

    /// Activate an affordance: log the announcement and any follow-up, then
    /// ask the host to navigate when the action names a page.
    pub fn activate(&mut self, action: ActionId, navigator: &mut dyn Navigator) -> ActionOutcome {
        let outcome = self.dispatcher.dispatch(action);
        info!(action = %action, page = ?outcome.navigate_to, "Action activated");

        self.log.push(ConversationTurn::assistant(
            outcome.announcement.clone(),
            TurnKind::Plain,
        ));
        if let Some(ref follow_up) = outcome.follow_up {
            self.log.push(ConversationTurn::assistant(
                follow_up.content.clone(),
                follow_up.kind,
            ));
        }
        self.persist();

        if let Some(page) = outcome.navigate_to {
            navigator.navigate(page);
        }
        outcome
    }

    /// Parse an action wire name and activate it.
    pub fn activate_named(
        &mut self,
        name: &str,
        navigator: &mut dyn Navigator,
    ) -> Result<ActionOutcome, AssistantError> {
        let action: ActionId = name.parse()?;
        Ok(self.activate(action, navigator))
    }

    /// Switch personality by name and announce it.
    pub fn switch_personality(&mut self, name: &str) -> Result<Personality, AssistantError> {
        let personality: Personality = name.parse()?;
        self.responder.set_personality(personality);
        self.log.push(ConversationTurn::assistant(
            format!(
                "🎭 Personality switched to {} mode ({}, {}).",
                personality,
                personality.profile().tone,
                personality.profile().style
            ),
            TurnKind::Plain,
        ));
        self.persist();
        info!(personality = %personality, "Personality switched");
        Ok(personality)
    }

    /// Drop the whole conversation and start over with the welcome message.
    pub fn clear_history(&mut self) {
        self.log.clear();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Could not clear saved history");
        }
        self.push_welcome();
        info!(session_id = %self.id, "Conversation cleared");
    }

    // -----------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------

    /// Topics discussed in the recent context window.
    pub fn recent_topics(&self) -> Vec<String> {
        self.log.recent_topics(
            self.responder.knowledge(),
            self.options.context_turns,
            self.responder.relevance_threshold(),
        )
    }

    pub fn stats(&self) -> AssistantStats {
        AssistantStats {
            total_turns: self.log.len(),
            knowledge_base_size: self.responder.knowledge().len(),
            available_personalities: Personality::ALL.len(),
            current_personality: self.responder.personality().to_string(),
        }
    }

    // -- Private helpers --

    /// Trim, cap length at a char boundary, and reject what is left blank.
    fn normalize(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let max = self.options.max_message_chars;
        if trimmed.chars().count() <= max {
            return Some(trimmed.to_string());
        }
        warn!(max_chars = max, "Message truncated");
        let truncated: String = trimmed.chars().take(max).collect();
        let truncated = truncated.trim_end();
        if truncated.is_empty() {
            return None;
        }
        Some(truncated.to_string())
    }

    fn push_welcome(&mut self) {
        self.log
            .push(ConversationTurn::assistant(welcome_message(), TurnKind::Interactive));
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.log) {
            warn!(error = %e, "Could not save conversation history");
        }
    }
}

/// Resolves once the flag is `true` or the sender is gone.
async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
