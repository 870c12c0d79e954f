//! Language-model generation port

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a prompt to a language-model backend and returns the generated text
/// verbatim. One round trip, no retries.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;
}
