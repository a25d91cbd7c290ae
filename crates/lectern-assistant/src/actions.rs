//! Affordance activation.
//!
//! Maps an [`ActionId`] emitted in a response to what the host should show
//! and where it should go. The dispatcher never navigates itself; the host
//! supplies a [`Navigator`].

use lectern_core::{ActionId, IntentCategory, Page, TurnKind};

use crate::responder::{action_button, AssistantResponse};

/// Host-side navigation target.
pub trait Navigator {
    fn navigate(&mut self, page: Page);
}

/// Navigator that records requests, used by hosts that poll.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Page>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, page: Page) {
        self.visited.push(page);
    }
}

/// What activating an action produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// Short assistant line shown immediately.
    pub announcement: String,
    pub navigate_to: Option<Page>,
    /// Extra content to append after the announcement.
    pub follow_up: Option<AssistantResponse>,
}

/// Stateless action-to-outcome mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionDispatcher;

impl ActionDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn dispatch(&self, action: ActionId) -> ActionOutcome {
        let navigate = |announcement: &str, page: Page| ActionOutcome {
            announcement: announcement.to_string(),
            navigate_to: Some(page),
            follow_up: None,
        };

        match action {
            ActionId::NavigateToTools | ActionId::DemoAiTools => {
                navigate("🚀 Redirecting you to the AI Tools section...", Page::AiTools)
            }
            ActionId::ViewResearchLab => {
                navigate("🔬 Opening the Research Laboratory...", Page::ResearchLab)
            }
            ActionId::CollaborationHub => {
                navigate("🤝 Taking you to the Collaboration Hub...", Page::Collaboration)
            }
            ActionId::ScheduleMeeting => navigate("📅 Opening meeting scheduler...", Page::Contact),
            ActionId::ViewCv | ActionId::Timeline => {
                navigate("📊 Loading academic timeline...", Page::Timeline)
            }
            ActionId::Publications => {
                navigate("📚 Opening publications section...", Page::Publications)
            }
            ActionId::RunForecast => ActionOutcome {
                announcement: "📈 Running quick forecast demonstration...".to_string(),
                navigate_to: None,
                follow_up: Some(forecast_demo()),
            },
            ActionId::BlockchainAnalysis | ActionId::ViewProjects => ActionOutcome {
                announcement: format!("🤖 Processing {}... This feature is coming soon!", action),
                navigate_to: None,
                follow_up: None,
            },
        }
    }
}

/// Fixed forecast result shown by the quick demo.
fn forecast_demo() -> AssistantResponse {
    let rows = [
        ("Indicator", "GDP Growth"),
        ("Prediction", "+2.4%"),
        ("Confidence", "94.2%"),
        ("Timeframe", "Next Quarter"),
    ];
    let grid = rows
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n");

    AssistantResponse {
        content: format!(
            "**🎯 Forecast Result:**\n{}\n\n{}",
            grid,
            action_button("🚀 Try Full Forecasting Tool", ActionId::NavigateToTools)
        ),
        category: IntentCategory::ToolRequest,
        kind: TurnKind::Interactive,
        suggested_action: Some(ActionId::NavigateToTools),
        topic: Some("forecasting".to_string()),
    }
}
