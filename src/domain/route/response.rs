use serde::{Deserialize, Serialize};

use super::RouteLabel;

/// The unit returned to a caller of `/ask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub source: RouteLabel,
    pub answer: String,
    pub cached: bool,
}

impl Answer {
    pub fn fresh(source: RouteLabel, answer: impl Into<String>) -> Self {
        Self {
            source,
            answer: answer.into(),
            cached: false,
        }
    }

    pub fn from_cache(source: RouteLabel, answer: impl Into<String>) -> Self {
        Self {
            source,
            answer: answer.into(),
            cached: true,
        }
    }
}

/// Normalizes a question for use as a cache key: trimmed, inner whitespace
/// collapsed to single spaces, lower-cased.
pub fn normalize_question(question: &str) -> String {
    question
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
