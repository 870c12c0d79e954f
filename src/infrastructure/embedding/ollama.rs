//! Ollama embedding client

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Client for Ollama's `/api/embeddings`
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<f32>, DomainError> {
        let response: OllamaEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::rejected("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embedding.is_empty() {
            return Err(DomainError::rejected("ollama", "Empty embedding returned"));
        }

        Ok(response.embedding)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": text,
        });

        let response = self.client.post_json(&self.embeddings_url(), &body).await?;
        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}
