//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheBackend, CacheSettings, DatabaseBackend, DatabaseConfig, EmbeddingConfig,
    GenerationConfig, LogFormat, LoggingConfig, RetrievalConfig, ServerConfig, TtlSettings,
    WebSearchConfig,
};
