//! DuckDuckGo HTML search client

use async_trait::async_trait;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{DomainError, SearchHit, WebSearchProvider};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_DUCKDUCKGO_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Scrapes DuckDuckGo's script-free results page
#[derive(Debug)]
pub struct DuckDuckGoSearch<C: HttpClientTrait> {
    client: C,
    endpoint: String,
}

impl<C: HttpClientTrait> DuckDuckGoSearch<C> {
    pub fn new(client: C) -> Self {
        Self::with_endpoint(client, DEFAULT_DUCKDUCKGO_ENDPOINT)
    }

    pub fn with_endpoint(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<String, DomainError> {
        Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map(String::from)
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Invalid search endpoint '{}': {}",
                    self.endpoint, e
                ))
            })
    }
}

#[async_trait]
impl<C: HttpClientTrait> WebSearchProvider for DuckDuckGoSearch<C> {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, DomainError> {
        let url = self.search_url(query)?;
        let page = self.client.get_text(&url).await?;

        parse_results(&page, max_results)
    }

    fn provider_name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Extracts organic results from a results page, skipping ads
pub fn parse_results(page: &str, max_results: usize) -> Result<Vec<SearchHit>, DomainError> {
    let result_sel = selector(".result")?;
    let link_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let document = Html::parse_document(page);
    let mut hits = Vec::new();

    for result in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };

        let title = element_text(&link);
        if title.is_empty() {
            continue;
        }

        let url = link
            .value()
            .attr("href")
            .map(resolve_result_url)
            .unwrap_or_default();

        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|s| element_text(&s))
            .unwrap_or_default();

        hits.push(SearchHit::new(title, snippet, url));
    }

    Ok(hits)
}

fn selector(css: &str) -> Result<Selector, DomainError> {
    Selector::parse(css)
        .map_err(|e| DomainError::internal(format!("Invalid selector '{}': {}", css, e)))
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result links point at a redirect carrying the target in `uddg`
fn resolve_result_url(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    Url::parse(&absolute)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or(absolute)
}
