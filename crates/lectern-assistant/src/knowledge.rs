//! Topic knowledge base and keyword relevance scoring.
//!
//! The knowledge base is an ordered list of hand-authored topics. Order
//! matters: when two topics score equally, the one authored first wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use lectern_core::LecternError;

use crate::error::AssistantError;

// =============================================================================
// TopicEntry
// =============================================================================

/// A named cluster of keywords with a description and canned answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub key: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub responses: Vec<String>,
}

impl TopicEntry {
    /// Build a topic, rejecting empty keyword or response lists.
    ///
    /// Keywords are lower-cased so scoring only has to fold the message.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        keywords: Vec<String>,
        responses: Vec<String>,
    ) -> Result<Self, AssistantError> {
        let key = key.into();
        if keywords.is_empty() || responses.is_empty() {
            return Err(AssistantError::InvalidTopic(key));
        }
        Ok(Self {
            key,
            description: description.into(),
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            responses,
        })
    }

    /// Fraction of this topic's keywords found in `message`.
    pub fn score(&self, message: &str) -> f32 {
        relevance_score(message, &self.keywords)
    }
}

/// Fraction of `keywords` occurring as substrings of the lower-cased message.
///
/// Containment is substring-based: "blockchains" matches "blockchain".
/// Returns 0.0 for an empty keyword list.
pub fn relevance_score<S: AsRef<str>>(message: &str, keywords: &[S]) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }
    let lower = message.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|k| lower.contains(&k.as_ref().to_lowercase()))
        .count();
    hits as f32 / keywords.len() as f32
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// The best-scoring topic for a message.
#[derive(Debug, Clone, Copy)]
pub struct TopicMatch<'a> {
    pub entry: &'a TopicEntry,
    pub score: f32,
}

#[derive(Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    topics: Vec<TopicEntry>,
}

/// Read-only, insertion-ordered collection of topics.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<TopicEntry>,
}

impl KnowledgeBase {
    /// Build from entries in authoring order. Keys must be unique.
    pub fn new(entries: Vec<TopicEntry>) -> Result<Self, AssistantError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.key.clone()) {
                return Err(AssistantError::DuplicateTopic(entry.key));
            }
            validated.push(TopicEntry::new(
                entry.key,
                entry.description,
                entry.keywords,
                entry.responses,
            )?);
        }
        Ok(Self { entries: validated })
    }

    /// Parse a `[[topics]]` TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, AssistantError> {
        let file: KnowledgeFile =
            toml::from_str(content).map_err(|e| AssistantError::KnowledgeBase(e.to_string()))?;
        Self::new(file.topics)
    }

    /// Load a `[[topics]]` TOML file.
    pub fn load(path: &Path) -> Result<Self, AssistantError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Could not read knowledge base");
            LecternError::from(e)
        })?;
        let kb = Self::from_toml_str(&content)?;
        info!(path = %path.display(), topics = kb.len(), "Knowledge base loaded");
        Ok(kb)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topics in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &TopicEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Highest-scoring topic for `message`.
    ///
    /// Only a strictly higher score replaces the current best, so ties go to
    /// the earlier topic. Returns `None` when the base is empty or nothing
    /// scores above zero.
    pub fn best_match(&self, message: &str) -> Option<TopicMatch<'_>> {
        let mut best: Option<TopicMatch<'_>> = None;
        let mut highest = 0.0_f32;
        for entry in &self.entries {
            let score = entry.score(message);
            if score > highest {
                highest = score;
                best = Some(TopicMatch { entry, score });
            }
        }
        best
    }

    /// The ten topics shipped with the portfolio.
    pub fn builtin() -> Self {
        let entries = BUILTIN_TOPICS
            .iter()
            .map(|(key, description, keywords, responses)| TopicEntry {
                key: (*key).to_string(),
                description: (*description).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                responses: responses.iter().map(|r| (*r).to_string()).collect(),
            })
            .collect();
        Self { entries }
    }
}

type BuiltinTopic = (&'static str, &'static str, &'static [&'static str], &'static [&'static str]);

static BUILTIN_TOPICS: &[BuiltinTopic] = &[
    (
        "economics",
        "My expertise spans macroeconomics, microeconomics, econometrics, and behavioral economics",
        &["gdp", "inflation", "monetary policy", "fiscal policy", "market analysis", "economic indicators"],
        &[
            "I specialize in applying AI and machine learning to economic analysis and forecasting.",
            "My research focuses on using advanced computational methods to understand economic phenomena.",
            "I work with large-scale economic datasets and develop predictive models for policy analysis.",
        ],
    ),
    (
        "ai",
        "Expertise in machine learning, deep learning, NLP, and AI applications in economics",
        &["machine learning", "deep learning", "neural networks", "lstm", "transformer", "nlp", "ai"],
        &[
            "I develop sophisticated AI models including LSTM networks, Transformers, and GANs for economic applications.",
            "My AI research focuses on time series forecasting, natural language processing of economic texts, and causal inference.",
            "I use cutting-edge deep learning techniques to analyze complex economic patterns and relationships.",
        ],
    ),
    (
        "research",
        "Current research projects and methodologies",
        &["research", "projects", "methodology", "experiments", "data", "analysis"],
        &[
            "I currently have several active research projects including GDP forecasting, blockchain economics, and policy impact analysis.",
            "My research methodology combines traditional econometric approaches with modern machine learning techniques.",
            "I collaborate with researchers worldwide on projects spanning AI, economics, and interdisciplinary studies.",
        ],
    ),
    (
        "collaboration",
        "Research collaboration and partnership opportunities",
        &["collaborate", "partnership", "work together", "team", "project"],
        &[
            "I'm always interested in collaborative research opportunities, especially in AI applications to economics.",
            "I work with academic institutions, research centers, and industry partners on innovative projects.",
            "My collaboration platform offers real-time whiteboard, code sharing, and video conferencing capabilities.",
        ],
    ),
    (
        "publications",
        "Academic publications and research output",
        &["papers", "publications", "articles", "journals", "conferences"],
        &[
            "I have published research in leading economics and AI journals, with a focus on practical applications.",
            "My recent publications cover topics like blockchain economics, NLP in central banking, and ML forecasting.",
            "You can find my complete publication list with citation metrics in the Publications section.",
        ],
    ),
    (
        "blockchain",
        "Blockchain technology and cryptocurrency economics",
        &["blockchain", "cryptocurrency", "bitcoin", "ethereum", "defi", "smart contracts"],
        &[
            "I research the economic implications of blockchain technology and decentralized finance protocols.",
            "My blockchain work includes network analysis, tokenomics, and the macroeconomic effects of cryptocurrencies.",
            "I analyze DeFi protocols using graph neural networks and game theory.",
        ],
    ),
    (
        "forecasting",
        "Economic forecasting and prediction models",
        &["forecast", "prediction", "future", "trends", "modeling"],
        &[
            "I develop advanced forecasting models using LSTM networks and ensemble methods for economic indicators.",
            "My forecasting approach combines traditional econometric models with modern deep learning techniques.",
            "I can demonstrate live forecasting tools for GDP, inflation, and other key economic variables.",
        ],
    ),
    (
        "policy",
        "Economic policy analysis and impact assessment",
        &["policy", "government", "regulation", "impact", "assessment"],
        &[
            "I analyze economic policies using causal inference methods and machine learning.",
            "My policy research includes fiscal policy, monetary policy, and regulatory impact assessment.",
            "I develop simulation models to predict the economic effects of policy interventions.",
        ],
    ),
    (
        "data",
        "Economic datasets and data analysis techniques",
        &["data", "dataset", "analysis", "statistics", "database"],
        &[
            "I work with comprehensive economic datasets including GDP, inflation, market data, and policy documents.",
            "My data analysis combines traditional statistical methods with modern machine learning approaches.",
            "I have access to high-quality, preprocessed datasets spanning multiple countries and decades.",
        ],
    ),
    (
        "tools",
        "AI tools and interactive demonstrations",
        &["tools", "demo", "interactive", "try", "test", "experiment"],
        &[
            "I offer several interactive AI tools including economic forecasting, sentiment analysis, and policy simulation.",
            "You can try my AI tools in the AI Tools section - they're all live and demonstrate real capabilities.",
            "Each tool includes detailed explanations, parameter controls, and downloadable results.",
        ],
    ),
];

// =============================================================================
// Tests
// =============================================================================
