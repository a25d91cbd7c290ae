//! Conversation history persistence.
//!
//! Persistence is best-effort: the session logs failures and carries on, so
//! a broken store never stops the assistant from answering.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use lectern_core::ConversationTurn;

use crate::context::ConversationLog;
use crate::error::AssistantError;

/// Storage for a single session's conversation log.
pub trait HistoryStore: Send {
    /// Restore the saved log. A store with nothing saved returns an empty log.
    fn load(&self) -> Result<ConversationLog, AssistantError>;
    /// Replace the saved log.
    fn save(&self, log: &ConversationLog) -> Result<(), AssistantError>;
    /// Forget the saved log.
    fn clear(&self) -> Result<(), AssistantError>;
}

// =============================================================================
// JsonFileHistory
// =============================================================================

/// Pretty-printed JSON array of turns in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistory {
    fn load(&self) -> Result<ConversationLog, AssistantError> {
        if !self.path.exists() {
            return Ok(ConversationLog::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AssistantError::History(format!("{}: {}", self.path.display(), e)))?;
        let turns: Vec<ConversationTurn> = serde_json::from_str(&content)
            .map_err(|e| AssistantError::History(format!("{}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), turns = turns.len(), "History loaded");
        Ok(ConversationLog::from_turns(turns))
    }

    fn save(&self, log: &ConversationLog) -> Result<(), AssistantError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AssistantError::History(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(log.turns())
            .map_err(|e| AssistantError::History(e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| AssistantError::History(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AssistantError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssistantError::History(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

// =============================================================================
// MemoryHistory
// =============================================================================

/// In-process store. Clones share the same backing log.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    inner: Arc<Mutex<ConversationLog>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what has been saved.
    pub fn saved(&self) -> ConversationLog {
        self.inner.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Result<ConversationLog, AssistantError> {
        self.inner
            .lock()
            .map(|l| l.clone())
            .map_err(|e| AssistantError::History(format!("history lock poisoned: {}", e)))
    }

    fn save(&self, log: &ConversationLog) -> Result<(), AssistantError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| AssistantError::History(format!("history lock poisoned: {}", e)))?;
        *guard = log.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), AssistantError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| AssistantError::History(format!("history lock poisoned: {}", e)))?;
        guard.clear();
        Ok(())
    }
}
