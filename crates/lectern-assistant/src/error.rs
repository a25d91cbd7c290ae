//! Error types for the research assistant.

use lectern_core::error::LecternError;

/// Errors from the assistant.
///
/// Classification and response generation are infallible; these only arise
/// while loading content, switching settings, or touching the history store.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("topic '{0}' must have at least one keyword and one response")]
    InvalidTopic(String),
    #[error("duplicate topic key: {0}")]
    DuplicateTopic(String),
    #[error("unknown personality: {0}")]
    UnknownPersonality(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("knowledge base error: {0}")]
    KnowledgeBase(String),
    #[error("history error: {0}")]
    History(String),
    #[error(transparent)]
    Core(LecternError),
}

impl From<LecternError> for AssistantError {
    fn from(err: LecternError) -> Self {
        match err {
            LecternError::UnknownAction(action) => AssistantError::UnknownAction(action),
            other => AssistantError::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::InvalidTopic("ai".to_string());
        assert_eq!(
            err.to_string(),
            "topic 'ai' must have at least one keyword and one response"
        );

        let err = AssistantError::DuplicateTopic("data".to_string());
        assert_eq!(err.to_string(), "duplicate topic key: data");

        let err = AssistantError::UnknownPersonality("sarcastic".to_string());
        assert_eq!(err.to_string(), "unknown personality: sarcastic");

        let err = AssistantError::UnknownAction("launch".to_string());
        assert_eq!(err.to_string(), "unknown action: launch");

        let err = AssistantError::KnowledgeBase("missing [[topics]]".to_string());
        assert_eq!(err.to_string(), "knowledge base error: missing [[topics]]");

        let err = AssistantError::History("disk full".to_string());
        assert_eq!(err.to_string(), "history error: disk full");
    }

    #[test]
    fn test_unknown_action_from_parse_keeps_its_name() {
        let err: AssistantError = "warp_drive"
            .parse::<lectern_core::ActionId>()
            .unwrap_err()
            .into();
        assert!(matches!(err, AssistantError::UnknownAction(ref a) if a == "warp_drive"));
        assert_eq!(err.to_string(), "unknown action: warp_drive");
    }

    #[test]
    fn test_other_core_errors_pass_through() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AssistantError = LecternError::Io(io).into();
        assert!(matches!(err, AssistantError::Core(LecternError::Io(_))));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
