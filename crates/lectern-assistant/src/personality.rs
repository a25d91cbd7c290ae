//! Assistant personalities.
//!
//! A personality changes the greeting pool and the transition phrase that
//! leads into a topic answer; the answers themselves are shared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// The three fixed personalities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Professional,
    #[default]
    Friendly,
    Expert,
}

/// Static content for one personality.
#[derive(Debug)]
pub struct PersonalityProfile {
    /// Shown when switching personality.
    pub tone: &'static str,
    pub style: &'static str,
    pub greetings: &'static [&'static str],
    /// Lead-ins for research answers.
    pub transitions: &'static [&'static str],
}

static PROFESSIONAL: PersonalityProfile = PersonalityProfile {
    tone: "formal",
    style: "academic",
    greetings: &[
        "Good day! I'm your AI research assistant.",
        "Hello! How can I assist with your research inquiries today?",
        "Greetings! I'm here to help with AI and economics research.",
    ],
    transitions: &[
        "Let me elaborate on that...",
        "From a research perspective...",
        "Based on my analysis...",
    ],
};

static FRIENDLY: PersonalityProfile = PersonalityProfile {
    tone: "casual",
    style: "conversational",
    greetings: &[
        "Hi there! Ready to explore some fascinating research?",
        "Hello! I'm excited to discuss AI and economics with you.",
        "Hey! What interesting research topic can I help you with?",
    ],
    transitions: &[
        "That's a great question!",
        "I love talking about this topic...",
        "Here's something interesting...",
    ],
};

static EXPERT: PersonalityProfile = PersonalityProfile {
    tone: "technical",
    style: "detailed",
    greetings: &[
        "Welcome to my research laboratory. How may I provide technical assistance?",
        "I'm your specialized AI assistant for advanced economic and computational research.",
        "Access granted to research AI. Please specify your technical inquiry.",
    ],
    transitions: &[
        "From a methodological standpoint...",
        "The technical implementation involves...",
        "Advanced analysis reveals...",
    ],
};

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Professional,
        Personality::Friendly,
        Personality::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Professional => "professional",
            Personality::Friendly => "friendly",
            Personality::Expert => "expert",
        }
    }

    pub fn profile(&self) -> &'static PersonalityProfile {
        match self {
            Personality::Professional => &PROFESSIONAL,
            Personality::Friendly => &FRIENDLY,
            Personality::Expert => &EXPERT,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Personality {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Personality::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| AssistantError::UnknownPersonality(s.trim().to_string()))
    }
}
