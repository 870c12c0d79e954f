//! Retrieval source: nearest records plus generation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{
    Adapter, DomainError, EmbeddingProvider, TextGenerator, VectorIndex, build_context,
};

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 8000;
pub const DEFAULT_DOMAIN_DESCRIPTION: &str = "Los Angeles crime records";

/// Knobs for the retrieval route
#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub max_context_chars: usize,
    /// Names the corpus in the prompt, e.g. "Los Angeles crime records"
    pub domain_description: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            domain_description: DEFAULT_DOMAIN_DESCRIPTION.to_string(),
        }
    }
}

/// Embeds the question, looks up the closest records and asks the
/// generator to answer from them
#[derive(Debug)]
pub struct RetrievalAdapter {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn TextGenerator>,
    settings: RetrievalSettings,
}

impl RetrievalAdapter {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
            settings: RetrievalSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RetrievalSettings) -> Self {
        self.settings = settings;
        self
    }

    fn build_prompt(&self, context: &str, question: &str) -> String {
        format!(
            "You are a data assistant for {domain}.\n\
             Answer ONLY using the context below. Be specific and cite details from the records.\n\n\
             Context (Top matching records):\n{context}\n\n\
             Question:\n{question}\n\n\
             Answer:",
            domain = self.settings.domain_description,
        )
    }
}

#[async_trait]
impl Adapter for RetrievalAdapter {
    async fn answer(&self, question: &str) -> Result<String, DomainError> {
        let query = self.embedder.embed(question).await?;
        let records = self.index.search(&query, self.settings.top_k)?;

        debug!(
            records = records.len(),
            closest = records.first().map(|r| r.distance),
            "Retrieved records"
        );

        let context = build_context(&records, self.settings.max_context_chars);
        let prompt = self.build_prompt(&context, question);

        self.generator.generate(&prompt).await
    }

    fn backend_name(&self) -> &'static str {
        self.generator.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::mock::MockEmbeddingProvider;
    use crate::domain::generation::mock::MockGenerator;
    use crate::domain::NO_RECORDS_MARKER;
    use crate::infrastructure::vector_index::{FlatIndex, UnloadedIndex};

    fn index() -> Arc<dyn VectorIndex> {
        Arc::new(
            FlatIndex::new(
                2,
                vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![1.0, 1.0]],
                vec![
                    "Robbery on Main St".to_string(),
                    "Unrelated record".to_string(),
                    "Burglary on 5th Ave".to_string(),
                ],
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_prompt_contains_closest_records_in_order() {
        let embedder = Arc::new(MockEmbeddingProvider::new(vec![0.0, 0.0]));
        let generator = Arc::new(MockGenerator::new("Two incidents were reported."));
        let adapter = RetrievalAdapter::new(embedder, index(), generator.clone()).with_settings(
            RetrievalSettings {
                top_k: 2,
                ..Default::default()
            },
        );

        let answer = adapter.answer("what robberies happened?").await.unwrap();

        assert_eq!(answer, "Two incidents were reported.");
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Los Angeles crime records"));
        assert!(prompt.contains("Robbery on Main St\n\nBurglary on 5th Ave"));
        assert!(!prompt.contains("Unrelated record"));
        assert!(prompt.ends_with("Question:\nwhat robberies happened?\n\nAnswer:"));
    }

    #[tokio::test]
    async fn test_empty_index_uses_marker() {
        let embedder = Arc::new(MockEmbeddingProvider::new(vec![0.0, 0.0]));
        let generator = Arc::new(MockGenerator::new("I don't know."));
        let empty: Arc<dyn VectorIndex> = Arc::new(FlatIndex::new(2, vec![], vec![]).unwrap());
        let adapter = RetrievalAdapter::new(embedder, empty, generator.clone());

        adapter.answer("any crimes?").await.unwrap();

        assert!(generator.prompts()[0].contains(NO_RECORDS_MARKER));
    }

    #[tokio::test]
    async fn test_unloaded_index_is_unavailable() {
        let embedder = Arc::new(MockEmbeddingProvider::new(vec![0.0, 0.0]));
        let generator = Arc::new(MockGenerator::new("unused"));
        let unloaded: Arc<dyn VectorIndex> = Arc::new(UnloadedIndex::new("file not found"));
        let adapter = RetrievalAdapter::new(embedder, unloaded, generator.clone());

        let result = adapter.answer("any crimes?").await;

        assert!(matches!(
            result,
            Err(DomainError::AdapterUnavailable { ref origin, .. }) if origin == "vector-index"
        ));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let embedder = Arc::new(MockEmbeddingProvider::new(vec![0.0, 0.0, 0.0]));
        let generator = Arc::new(MockGenerator::new("unused"));
        let adapter = RetrievalAdapter::new(embedder, index(), generator.clone());

        let result = adapter.answer("crimes?").await;

        assert!(matches!(result, Err(DomainError::AdapterRejected { .. })));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_outage_is_unavailable() {
        let embedder = Arc::new(MockEmbeddingProvider::new(vec![0.0, 0.0]).with_error("down"));
        let generator = Arc::new(MockGenerator::new("unused"));
        let adapter = RetrievalAdapter::new(embedder, index(), generator);

        assert!(matches!(
            adapter.answer("crimes?").await,
            Err(DomainError::AdapterUnavailable { .. })
        ));
    }
}
