//! General source: direct generation without context

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Adapter, DomainError, TextGenerator};

#[derive(Debug)]
pub struct GeneralAdapter {
    generator: Arc<dyn TextGenerator>,
}

impl GeneralAdapter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

fn build_prompt(question: &str) -> String {
    format!(
        "You are a helpful AI assistant. Answer the following question clearly and accurately.\n\n\
         Question: {}\n\n\
         Answer:",
        question
    )
}

#[async_trait]
impl Adapter for GeneralAdapter {
    async fn answer(&self, question: &str) -> Result<String, DomainError> {
        self.generator.generate(&build_prompt(question)).await
    }

    fn backend_name(&self) -> &'static str {
        self.generator.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::mock::MockGenerator;

    #[tokio::test]
    async fn test_wraps_question_in_prompt() {
        let generator = Arc::new(MockGenerator::new("Paris."));
        let adapter = GeneralAdapter::new(generator.clone());

        assert_eq!(adapter.answer("capital of france?").await.unwrap(), "Paris.");
        assert_eq!(
            generator.prompts()[0],
            "You are a helpful AI assistant. Answer the following question clearly and accurately.\n\n\
             Question: capital of france?\n\nAnswer:"
        );
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let adapter = GeneralAdapter::new(Arc::new(MockGenerator::with_error("timeout")));

        assert!(matches!(
            adapter.answer("hi").await,
            Err(DomainError::AdapterUnavailable { .. })
        ));
    }
}
