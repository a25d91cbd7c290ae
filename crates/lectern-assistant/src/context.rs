//! Conversation log and context summaries.
//!
//! The log is append-only: turns are never edited once pushed, and the only
//! other mutation is clearing the whole log.

use serde::{Deserialize, Serialize};

use lectern_core::ConversationTurn;

use crate::knowledge::KnowledgeBase;

// =============================================================================
// ConversationLog
// =============================================================================

/// Ordered turns owned by a single session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap turns restored from storage.
    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    /// Append a turn and return it.
    pub fn push(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Truncate to empty.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Topics discussed in the last `window` turns.
    ///
    /// A topic counts when any of those turns scores strictly above
    /// `threshold` against it. Keys are deduplicated in first-seen order.
    pub fn recent_topics(&self, kb: &KnowledgeBase, window: usize, threshold: f32) -> Vec<String> {
        let start = self.turns.len().saturating_sub(window);
        let mut topics: Vec<String> = Vec::new();
        for turn in &self.turns[start..] {
            for entry in kb.iter() {
                if entry.score(&turn.text) > threshold && !topics.contains(&entry.key) {
                    topics.push(entry.key.clone());
                }
            }
        }
        topics
    }
}

// =============================================================================
// AssistantStats
// =============================================================================

/// Snapshot of the assistant's state for status displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantStats {
    pub total_turns: usize,
    pub knowledge_base_size: usize,
    pub available_personalities: usize,
    pub current_personality: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::{Speaker, TurnKind};

    fn log_of(texts: &[&str]) -> ConversationLog {
        let mut log = ConversationLog::new();
        for t in texts {
            log.push(ConversationTurn::user(*t));
        }
        log
    }

    // ---- Log ----

    #[test]
    fn test_push_preserves_order() {
        let mut log = ConversationLog::new();
        log.push(ConversationTurn::user("first"));
        log.push(ConversationTurn::assistant("second", TurnKind::Plain));
        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].text, "first");
        assert_eq!(log.last().unwrap().speaker, Speaker::Assistant);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = log_of(&["a", "b", "c"]);
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let log = log_of(&["hello"]);
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["text"], "hello");
        assert_eq!(json[0]["speaker"], "user");
    }

    // ---- Recent topics ----

    #[test]
    fn test_recent_topics_detects_confident_topics() {
        let kb = KnowledgeBase::builtin();
        let log = log_of(&["bitcoin ethereum defi", "nothing relevant here"]);
        assert_eq!(log.recent_topics(&kb, 5, 0.3), vec!["blockchain".to_string()]);
    }

    #[test]
    fn test_recent_topics_respects_window() {
        let kb = KnowledgeBase::builtin();
        let log = log_of(&[
            "bitcoin ethereum defi",
            "filler one",
            "filler two",
        ]);
        assert!(log.recent_topics(&kb, 2, 0.3).is_empty());
        assert_eq!(log.recent_topics(&kb, 3, 0.3).len(), 1);
    }

    #[test]
    fn test_recent_topics_deduplicates_in_first_seen_order() {
        let kb = KnowledgeBase::builtin();
        let log = log_of(&[
            "government regulation policy",
            "bitcoin ethereum defi",
            "policy government impact",
        ]);
        assert_eq!(
            log.recent_topics(&kb, 10, 0.3),
            vec!["policy".to_string(), "blockchain".to_string()]
        );
    }

    #[test]
    fn test_recent_topics_empty_log() {
        let kb = KnowledgeBase::builtin();
        assert!(ConversationLog::new().recent_topics(&kb, 5, 0.3).is_empty());
    }
}
