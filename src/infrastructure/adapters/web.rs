//! Web source: live search results

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Adapter, DomainError, SearchHit, WebSearchProvider};

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Answers with a numbered summary of search results
#[derive(Debug)]
pub struct WebSearchAdapter {
    provider: Arc<dyn WebSearchProvider>,
    max_results: usize,
}

impl WebSearchAdapter {
    pub fn new(provider: Arc<dyn WebSearchProvider>) -> Self {
        Self {
            provider,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }
}

fn format_hit(position: usize, hit: &SearchHit) -> String {
    format!(
        "[{}] {}\n{}\nSource: {}\n",
        position, hit.title, hit.snippet, hit.url
    )
}

#[async_trait]
impl Adapter for WebSearchAdapter {
    async fn answer(&self, question: &str) -> Result<String, DomainError> {
        let hits = self.provider.search(question, self.max_results).await?;
        debug!(hits = hits.len(), "Web search completed");

        if hits.is_empty() {
            return Err(DomainError::rejected(
                self.provider.provider_name(),
                "No web results found for the query",
            ));
        }

        let blocks: Vec<String> = hits
            .iter()
            .take(self.max_results)
            .enumerate()
            .map(|(i, hit)| format_hit(i + 1, hit))
            .collect();

        Ok(blocks.join("\n"))
    }

    fn backend_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}
