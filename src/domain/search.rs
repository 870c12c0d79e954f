//! Web search port

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// One result returned by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}

/// External search provider. Returns at most `max_results` hits, possibly none.
#[async_trait]
pub trait WebSearchProvider: Send + Sync + Debug {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, DomainError>;

    fn provider_name(&self) -> &'static str;
}
