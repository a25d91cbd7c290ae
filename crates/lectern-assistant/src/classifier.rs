//! Rule-based intent classification.
//!
//! One ordered rule list decides the response family for every message.
//! The first matching rule wins; nothing matching means `General`.

use std::sync::LazyLock;

use regex::Regex;

use lectern_core::IntentCategory;

// =============================================================================
// Rules (compiled once, reused across calls)
// =============================================================================

static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:hi|hello|hey|good morning|good afternoon|good evening)")
        .expect("Invalid greeting regex")
});

/// A keyword rule: any keyword contained in the lower-cased message selects
/// the category.
struct KeywordRule {
    category: IntentCategory,
    keywords: &'static [&'static str],
    confidence: f32,
}

static KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: IntentCategory::ResearchInquiry,
        keywords: &["research", "study", "analysis", "model", "data"],
        confidence: 0.8,
    },
    KeywordRule {
        category: IntentCategory::ToolRequest,
        keywords: &["show", "demo", "try", "test", "tool", "forecast"],
        confidence: 0.8,
    },
    KeywordRule {
        category: IntentCategory::Collaboration,
        keywords: &["collaborate", "work together", "partnership", "team"],
        confidence: 0.8,
    },
    KeywordRule {
        category: IntentCategory::Technical,
        keywords: &["how", "implementation", "algorithm", "technical", "code"],
        confidence: 0.7,
    },
    KeywordRule {
        category: IntentCategory::Personal,
        keywords: &["about you", "your background", "experience", "education"],
        confidence: 0.8,
    },
];

const GREETING_CONFIDENCE: f32 = 0.9;
const FALLBACK_CONFIDENCE: f32 = 0.5;

// =============================================================================
// IntentClassifier
// =============================================================================

/// Category plus how sure the rule that produced it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: IntentCategory,
    pub confidence: f32,
}

/// Stateless rule-based intent classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. Always returns a category.
    pub fn classify(&self, message: &str) -> IntentCategory {
        self.analyze(message).category
    }

    /// Classify a message and report the matching rule's confidence.
    ///
    /// Rules in order: greeting (anchored at the start), research, tool,
    /// collaboration, technical, personal. Falls back to `General`.
    pub fn analyze(&self, message: &str) -> Classification {
        let lower = message.trim_start().to_lowercase();

        if GREETING_RE.is_match(&lower) {
            return Classification {
                category: IntentCategory::Greeting,
                confidence: GREETING_CONFIDENCE,
            };
        }

        for rule in KEYWORD_RULES {
            if contains_any(&lower, rule.keywords) {
                return Classification {
                    category: rule.category,
                    confidence: rule.confidence,
                };
            }
        }

        Classification {
            category: IntentCategory::General,
            confidence: FALLBACK_CONFIDENCE,
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

// =============================================================================
// Tests
// =============================================================================
