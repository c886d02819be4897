//! Keyword feature extraction and complexity assessment.

use tracing::debug;

use super::model::Complexity;

/// Vocabulary matched by [`extract_features`], in reporting order.
pub const FEATURE_KEYWORDS: &[&str] = &[
    "authentication",
    "login",
    "signup",
    "database",
    "API",
    "endpoint",
    "UI",
    "interface",
    "frontend",
    "backend",
    "component",
    "service",
    "validation",
    "testing",
    "deployment",
];

/// Word count below which text can still be `simple`.
const SIMPLE_MAX_WORDS: usize = 50;
/// Feature count at or below which text can still be `simple`.
const SIMPLE_MAX_FEATURES: usize = 2;
/// Word count below which text can still be `moderate`.
const MODERATE_MAX_WORDS: usize = 150;
/// Feature count at or below which text can still be `moderate`.
const MODERATE_MAX_FEATURES: usize = 5;

/// Returns the vocabulary keywords found anywhere in `text`.
///
/// Matching is a case-insensitive substring test, so `"UI"` also fires on
/// words like "build". Labels keep their vocabulary spelling.
#[must_use]
pub fn extract_features(text: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    FEATURE_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .collect()
}

/// Classifies requirement text by word count and matched feature count.
#[must_use]
pub fn assess_complexity(text: &str) -> Complexity {
    let word_count = text.split_whitespace().count();
    let feature_count = extract_features(text).len();
    let complexity = classify(word_count, feature_count);
    debug!(word_count, feature_count, %complexity, "assessed requirement complexity");
    complexity
}

fn classify(word_count: usize, feature_count: usize) -> Complexity {
    if word_count < SIMPLE_MAX_WORDS && feature_count <= SIMPLE_MAX_FEATURES {
        Complexity::Simple
    } else if word_count < MODERATE_MAX_WORDS && feature_count <= MODERATE_MAX_FEATURES {
        Complexity::Moderate
    } else {
        Complexity::Complex
    }
}
