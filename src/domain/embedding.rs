//! Embedding port

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Turns text into a fixed-dimension vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;
}
