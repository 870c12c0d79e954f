use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{ClassifierConfig, TtlPolicy};
use crate::infrastructure::adapters::{
    DEFAULT_DOMAIN_DESCRIPTION, DEFAULT_MAX_CONTEXT_CHARS, DEFAULT_MAX_RESULTS, DEFAULT_TOP_K,
    RetrievalSettings,
};
use crate::infrastructure::cache::CacheConfig;
use crate::infrastructure::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::infrastructure::llm::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::search::DEFAULT_DUCKDUCKGO_ENDPOINT;
use crate::infrastructure::student::PostgresConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub web_search: WebSearchConfig,
    pub classifier: ClassifierConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Answer cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub redis_url: String,
    pub key_prefix: Option<String>,
    pub max_capacity: u64,
    pub connection_timeout_secs: u64,
    pub ttl: TtlSettings,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    Redis,
    InMemory,
}

/// Per-source TTLs in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TtlSettings {
    pub student: u64,
    pub web: u64,
    pub rag: u64,
    pub general: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Create the `students` table at startup if missing
    pub ensure_schema: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    InMemory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Defaults to the generation base URL when unset
    pub base_url: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub index_path: PathBuf,
    pub records_path: PathBuf,
    pub top_k: usize,
    pub max_context_chars: usize,
    pub domain_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    pub endpoint: String,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
            max_capacity: 10_000,
            connection_timeout_secs: 5,
            ttl: TtlSettings::default(),
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        let mut config = match self.backend {
            CacheBackend::Redis => CacheConfig::redis(&self.redis_url),
            CacheBackend::InMemory => CacheConfig::in_memory(),
        }
        .with_max_capacity(self.max_capacity)
        .with_connection_timeout(Duration::from_secs(self.connection_timeout_secs));

        if let Some(prefix) = &self.key_prefix {
            config = config.with_key_prefix(prefix.clone());
        }

        config
    }
}

impl Default for TtlSettings {
    fn default() -> Self {
        let policy = TtlPolicy::default();

        Self {
            student: policy.student.as_secs(),
            web: policy.web.as_secs(),
            rag: policy.rag.as_secs(),
            general: policy.general.as_secs(),
        }
    }
}

impl TtlSettings {
    pub fn to_policy(&self) -> TtlPolicy {
        TtlPolicy {
            student: Duration::from_secs(self.student),
            web: Duration::from_secs(self.web),
            rag: Duration::from_secs(self.rag),
            general: Duration::from_secs(self.general),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let postgres = PostgresConfig::default();

        Self {
            backend: DatabaseBackend::default(),
            host: postgres.host,
            port: postgres.port,
            name: postgres.database,
            user: postgres.user,
            password: postgres.password,
            max_connections: postgres.max_connections,
            acquire_timeout_secs: postgres.acquire_timeout_secs,
            ensure_schema: false,
        }
    }
}

impl DatabaseConfig {
    pub fn to_postgres_config(&self) -> PostgresConfig {
        PostgresConfig {
            host: self.host.clone(),
            port: self.port,
            database: self.name.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            max_connections: self.max_connections,
            acquire_timeout_secs: self.acquire_timeout_secs,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("data/index.json"),
            records_path: PathBuf::from("data/records.json"),
            top_k: DEFAULT_TOP_K,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            domain_description: DEFAULT_DOMAIN_DESCRIPTION.to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn to_settings(&self) -> RetrievalSettings {
        RetrievalSettings {
            top_k: self.top_k.max(1),
            max_context_chars: self.max_context_chars,
            domain_description: self.domain_description.clone(),
        }
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DUCKDUCKGO_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn embedding_base_url(&self) -> &str {
        self.embedding
            .base_url
            .as_deref()
            .unwrap_or(&self.generation.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::CacheType;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generation.model, "phi3");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.web_search.max_results, 5);
        assert_eq!(config.cache.ttl.to_policy(), TtlPolicy::default());
        assert_eq!(config.embedding_base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [cache]
            backend = "in_memory"

            [cache.ttl]
            web = 60

            [logging]
            format = "json"
            "#,
        );

        assert_eq!(config.cache.backend, CacheBackend::InMemory);
        assert_eq!(config.cache.ttl.web, 60);
        assert_eq!(config.cache.ttl.rag, 1800);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_classifier_rules_from_file() {
        let config = from_toml(
            r#"
            [[classifier.rules]]
            label = "web"
            keywords = ["forecast"]
            "#,
        );

        assert_eq!(config.classifier.rules.len(), 1);
        assert_eq!(config.classifier.rules[0].keywords, vec!["forecast".to_string()]);
    }

    #[test]
    fn test_cache_config_conversion() {
        let settings = CacheSettings {
            key_prefix: Some("ask".to_string()),
            ..Default::default()
        };
        let config = settings.to_cache_config();

        assert_eq!(config.cache_type, CacheType::Redis);
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
        assert_eq!(config.key_prefix.as_deref(), Some("ask"));
    }
}
