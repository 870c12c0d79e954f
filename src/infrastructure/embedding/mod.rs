//! Embedding clients

mod ollama;

pub use ollama::{DEFAULT_EMBEDDING_MODEL, OllamaEmbeddingProvider};
