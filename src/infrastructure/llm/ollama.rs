//! Ollama text generation client

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, TextGenerator};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "phi3";

/// Non-streaming client for Ollama's `/api/generate`
#[derive(Debug)]
pub struct OllamaGenerator<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaGenerator<C> {
    pub fn new(client: C, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: OllamaGenerateResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::rejected("ollama", format!("Failed to parse generate response: {}", e))
        })?;

        if let Some(error) = response.error {
            return Err(DomainError::rejected("ollama", error));
        }

        match response.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(DomainError::rejected("ollama", "Response contained no text")),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> TextGenerator for OllamaGenerator<C> {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let body = self.build_request(prompt);
        let response = self.client.post_json(&self.generate_url(), &body).await?;

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
struct OllamaGenerateResponse {
    response: Option<String>,
    error: Option<String>,
}
