//! Shared HTTP client for outbound backend calls

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
///
/// Connection failures, timeouts and non-2xx responses are reported as
/// [`DomainError::AdapterUnavailable`]; undecodable bodies as
/// [`DomainError::AdapterRejected`].
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn get_text(&self, url: &str) -> Result<String, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    origin: &'static str,
}

impl HttpClient {
    /// `origin` names the backend in the errors this client returns
    pub fn new(origin: &'static str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ask-router/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, origin })
    }

    fn request_error(&self, error: reqwest::Error) -> DomainError {
        if error.is_timeout() {
            DomainError::unavailable(self.origin, format!("Request timed out: {}", error))
        } else {
            DomainError::unavailable(self.origin, format!("Request failed: {}", error))
        }
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DomainError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(self.origin, status, &body))
    }
}

fn status_error(origin: &str, status: StatusCode, body: &str) -> DomainError {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, truncate(body, 200))
    };

    DomainError::unavailable(origin, message)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let response = self.check_status(response).await?;

        response.json().await.map_err(|e| {
            DomainError::rejected(self.origin, format!("Failed to parse response: {}", e))
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let response = self.check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| DomainError::unavailable(self.origin, format!("Failed to read body: {}", e)))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Canned responses keyed by URL
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        json_responses: RwLock<HashMap<String, serde_json::Value>>,
        text_responses: RwLock<HashMap<String, String>>,
        errors: RwLock<HashMap<String, String>>,
        requests: RwLock<Vec<(String, Option<serde_json::Value>)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.json_responses
                .write()
                .unwrap()
                .insert(url.into(), response);
            self
        }

        pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.text_responses
                .write()
                .unwrap()
                .insert(url.into(), body.into());
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors.write().unwrap().insert(url.into(), error.into());
            self
        }

        /// Requests seen so far, with their JSON bodies
        pub fn requests(&self) -> Vec<(String, Option<serde_json::Value>)> {
            self.requests.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.requests
                .write()
                .unwrap()
                .push((url.to_string(), Some(body.clone())));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::unavailable("mock", error));
            }

            self.json_responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::rejected("mock", format!("No mock response for {}", url)))
        }

        async fn get_text(&self, url: &str) -> Result<String, DomainError> {
            self.requests.write().unwrap().push((url.to_string(), None));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::unavailable("mock", error));
            }

            self.text_responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::rejected("mock", format!("No mock response for {}", url)))
        }
    }
}
