//! Cached answers and the per-source TTL policy

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::route::RouteLabel;

/// A previously computed answer, keyed by its normalized question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAnswer {
    pub question: String,
    pub source: RouteLabel,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl CachedAnswer {
    pub fn new(question: impl Into<String>, source: RouteLabel, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            source,
            answer: answer.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the entry is still within its source's TTL at `now`.
    ///
    /// A TTL reaching past the representable date range never expires.
    pub fn is_fresh(&self, policy: &TtlPolicy, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(policy.ttl_for(self.source))
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .is_none_or(|expires_at| now < expires_at)
    }
}

/// Time-to-live per source tag, fixed at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub student: Duration,
    pub web: Duration,
    pub rag: Duration,
    pub general: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            student: Duration::from_secs(600),
            web: Duration::from_secs(300),
            rag: Duration::from_secs(1800),
            general: Duration::from_secs(900),
        }
    }
}

impl TtlPolicy {
    /// Same TTL for every source
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            student: ttl,
            web: ttl,
            rag: ttl,
            general: ttl,
        }
    }

    pub fn ttl_for(&self, label: RouteLabel) -> Duration {
        match label {
            RouteLabel::Structured => self.student,
            RouteLabel::Web => self.web,
            RouteLabel::Retrieval => self.rag,
            RouteLabel::General => self.general,
        }
    }
}
