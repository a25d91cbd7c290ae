use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LecternError;

// =============================================================================
// Enums
// =============================================================================

/// Coarse classification of a user message.
///
/// Selects which response family the assistant draws from. Computed per
/// message and never persisted on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    ResearchInquiry,
    ToolRequest,
    Collaboration,
    Technical,
    Personal,
    General,
}

impl IntentCategory {
    /// Every category, in rule-evaluation order.
    pub const ALL: [IntentCategory; 7] = [
        IntentCategory::Greeting,
        IntentCategory::ResearchInquiry,
        IntentCategory::ToolRequest,
        IntentCategory::Collaboration,
        IntentCategory::Technical,
        IntentCategory::Personal,
        IntentCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Greeting => "greeting",
            IntentCategory::ResearchInquiry => "research_inquiry",
            IntentCategory::ToolRequest => "tool_request",
            IntentCategory::Collaboration => "collaboration",
            IntentCategory::Technical => "technical",
            IntentCategory::Personal => "personal",
            IntentCategory::General => "general",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who produced a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// How a turn should be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Text only.
    #[default]
    Plain,
    /// Contains activatable affordances (action buttons, tool cards).
    Interactive,
}

/// Opaque identifier of an affordance embedded in a response.
///
/// The assistant only ever emits these; the host decides what activating
/// one does (usually navigation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    NavigateToTools,
    DemoAiTools,
    ViewResearchLab,
    RunForecast,
    BlockchainAnalysis,
    CollaborationHub,
    ScheduleMeeting,
    ViewProjects,
    ViewCv,
    Publications,
    Timeline,
}

impl ActionId {
    pub const ALL: [ActionId; 11] = [
        ActionId::NavigateToTools,
        ActionId::DemoAiTools,
        ActionId::ViewResearchLab,
        ActionId::RunForecast,
        ActionId::BlockchainAnalysis,
        ActionId::CollaborationHub,
        ActionId::ScheduleMeeting,
        ActionId::ViewProjects,
        ActionId::ViewCv,
        ActionId::Publications,
        ActionId::Timeline,
    ];

    /// Wire name, as embedded in response markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::NavigateToTools => "navigate_to_tools",
            ActionId::DemoAiTools => "demo_ai_tools",
            ActionId::ViewResearchLab => "view_research_lab",
            ActionId::RunForecast => "run_forecast",
            ActionId::BlockchainAnalysis => "blockchain_analysis",
            ActionId::CollaborationHub => "collaboration_hub",
            ActionId::ScheduleMeeting => "schedule_meeting",
            ActionId::ViewProjects => "view_projects",
            ActionId::ViewCv => "view_cv",
            ActionId::Publications => "publications",
            ActionId::Timeline => "timeline",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = LecternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ActionId::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| LecternError::UnknownAction(s.trim().to_string()))
    }
}

/// Pages of the portfolio the host can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    AiTools,
    ResearchLab,
    Collaboration,
    Contact,
    Timeline,
    Publications,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::AiTools => "ai-tools",
            Page::ResearchLab => "research-lab",
            Page::Collaboration => "collaboration",
            Page::Contact => "contact",
            Page::Timeline => "timeline",
            Page::Publications => "publications",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Structs
// =============================================================================

/// One message in the conversation log. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: TurnKind,
}

impl ConversationTurn {
    /// A plain turn typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Utc::now(),
            kind: TurnKind::Plain,
        }
    }

    /// A turn produced by the assistant.
    pub fn assistant(text: impl Into<String>, kind: TurnKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            kind,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_category_serde_snake_case() {
        let json = serde_json::to_string(&IntentCategory::ResearchInquiry).unwrap();
        assert_eq!(json, "\"research_inquiry\"");
        let back: IntentCategory = serde_json::from_str("\"tool_request\"").unwrap();
        assert_eq!(back, IntentCategory::ToolRequest);
    }

    #[test]
    fn test_intent_category_display_matches_serde() {
        for cat in IntentCategory::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat));
        }
    }

    #[test]
    fn test_action_id_from_str() {
        assert_eq!("run_forecast".parse::<ActionId>().unwrap(), ActionId::RunForecast);
        assert_eq!(" VIEW_CV ".parse::<ActionId>().unwrap(), ActionId::ViewCv);
        let err = "launch_rockets".parse::<ActionId>().unwrap_err();
        assert!(matches!(err, LecternError::UnknownAction(ref a) if a == "launch_rockets"));
    }

    #[test]
    fn test_action_id_display_matches_serde() {
        for action in ActionId::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action));
        }
    }

    #[test]
    fn test_page_serde_kebab_case() {
        let json = serde_json::to_string(&Page::ResearchLab).unwrap();
        assert_eq!(json, "\"research-lab\"");
        assert_eq!(Page::AiTools.to_string(), "ai-tools");
    }

    #[test]
    fn test_user_turn_defaults() {
        let turn = ConversationTurn::user("hello");
        assert_eq!(turn.speaker, Speaker::User);
        assert_eq!(turn.kind, TurnKind::Plain);
        assert_eq!(turn.text, "hello");
        assert_ne!(turn.id, Uuid::nil());
    }

    #[test]
    fn test_turn_kind_defaults_when_missing() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "speaker": "assistant",
            "text": "hi",
            "timestamp": "2025-01-01T00:00:00Z"
        }"#;
        let turn: ConversationTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.kind, TurnKind::Plain);
        assert_eq!(turn.speaker, Speaker::Assistant);
    }
}
