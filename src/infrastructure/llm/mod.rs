//! Language-model clients

mod ollama;

pub use ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL, OllamaGenerator};
