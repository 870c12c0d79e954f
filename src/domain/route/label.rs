//! The closed set of routes a question can take

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Category assigned to an incoming question.
///
/// Serialized with its wire tag (`student`, `web`, `rag`, `general`), which is
/// also the `source` reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteLabel {
    /// Structured database over the student records
    #[serde(rename = "student", alias = "structured")]
    Structured,
    /// Live web search
    #[serde(rename = "web")]
    Web,
    /// Retrieval-augmented generation over the document index
    #[serde(rename = "rag", alias = "retrieval")]
    Retrieval,
    /// Direct language-model answer
    #[serde(rename = "general")]
    General,
}

impl RouteLabel {
    pub const ALL: [RouteLabel; 4] = [
        RouteLabel::Structured,
        RouteLabel::Web,
        RouteLabel::Retrieval,
        RouteLabel::General,
    ];

    /// Source tag reported in responses and stored with cache entries
    pub fn source_tag(&self) -> &'static str {
        match self {
            RouteLabel::Structured => "student",
            RouteLabel::Web => "web",
            RouteLabel::Retrieval => "rag",
            RouteLabel::General => "general",
        }
    }

    /// Internal route name
    pub fn name(&self) -> &'static str {
        match self {
            RouteLabel::Structured => "structured",
            RouteLabel::Web => "web",
            RouteLabel::Retrieval => "retrieval",
            RouteLabel::General => "general",
        }
    }
}

impl fmt::Display for RouteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_tag())
    }
}

impl FromStr for RouteLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "structured" => Ok(RouteLabel::Structured),
            "web" => Ok(RouteLabel::Web),
            "rag" | "retrieval" => Ok(RouteLabel::Retrieval),
            "general" => Ok(RouteLabel::General),
            _ => Err(DomainError::validation(format!(
                "Unknown route label: {}. Valid labels: student, web, rag, general",
                s
            ))),
        }
    }
}
