//! ask-router
//!
//! Answers natural-language questions from exactly one of four sources:
//! - a student records database
//! - live web search
//! - retrieval over a pre-built vector index, answered by a local LLM
//! - the local LLM on its own
//!
//! Answers are cached per normalized question, with a TTL chosen by source.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use crate::config::DatabaseBackend;
use domain::{AdapterSet, KeywordClassifier, StudentRepository, VectorIndex};
use infrastructure::{
    adapters::{GeneralAdapter, RetrievalAdapter, StructuredAdapter, WebSearchAdapter},
    cache::CacheFactory,
    embedding::OllamaEmbeddingProvider,
    http_client::HttpClient,
    llm::OllamaGenerator,
    search::DuckDuckGoSearch,
    services::AnswerService,
    student::{InMemoryStudentRepository, PostgresStudentRepository},
    vector_index::{FlatIndex, UnloadedIndex},
};
use tracing::{info, warn};

/// Builds every shared handle from configuration.
///
/// Nothing here needs a backend to be up: Redis falls back to an in-memory
/// cache, Postgres connects on first use and a missing index leaves the
/// retrieval route unavailable.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = CacheFactory::new()
        .create_or_fallback(&config.cache.to_cache_config())
        .await?;

    let students = create_student_repository(config).await;
    let index = load_index(config);

    let generator = Arc::new(OllamaGenerator::new(
        HttpClient::new("ollama", Duration::from_secs(config.generation.timeout_secs))?,
        &config.generation.base_url,
        &config.generation.model,
    ));
    let embedder = Arc::new(OllamaEmbeddingProvider::new(
        HttpClient::new("ollama", Duration::from_secs(config.embedding.timeout_secs))?,
        config.embedding_base_url(),
        &config.embedding.model,
    ));
    let search = Arc::new(DuckDuckGoSearch::with_endpoint(
        HttpClient::new("duckduckgo", Duration::from_secs(config.web_search.timeout_secs))?,
        &config.web_search.endpoint,
    ));

    let adapters = AdapterSet {
        structured: Arc::new(StructuredAdapter::new(students.clone())),
        web: Arc::new(WebSearchAdapter::new(search).with_max_results(config.web_search.max_results)),
        retrieval: Arc::new(
            RetrievalAdapter::new(embedder, index.clone(), generator.clone())
                .with_settings(config.retrieval.to_settings()),
        ),
        general: Arc::new(GeneralAdapter::new(generator)),
    };

    let classifier = Arc::new(KeywordClassifier::new(&config.classifier)?);

    let service = AnswerService::new(classifier, adapters, cache)
        .with_ttl_policy(config.cache.ttl.to_policy());

    info!(
        cache = service.cache().backend_name(),
        database = students.backend_name(),
        index_records = index.len(),
        model = %config.generation.model,
        "Application state initialized"
    );

    Ok(AppState::new(service, students, index))
}

async fn create_student_repository(config: &AppConfig) -> Arc<dyn StudentRepository> {
    match config.database.backend {
        DatabaseBackend::InMemory => {
            info!("Using in-memory student repository");
            Arc::new(InMemoryStudentRepository::new())
        }
        DatabaseBackend::Postgres => {
            let repo = PostgresStudentRepository::connect_lazy(&config.database.to_postgres_config());

            if config.database.ensure_schema {
                if let Err(e) = repo.ensure_table().await {
                    warn!(error = %e, "Could not ensure students table, continuing");
                }
            }

            info!(
                host = %config.database.host,
                database = %config.database.name,
                "Using PostgreSQL student repository"
            );
            Arc::new(repo)
        }
    }
}

fn load_index(config: &AppConfig) -> Arc<dyn VectorIndex> {
    match FlatIndex::load(&config.retrieval.index_path, &config.retrieval.records_path) {
        Ok(index) => Arc::new(index),
        Err(e) => {
            warn!(error = %e, "Retrieval index not loaded, rag answers will be unavailable");
            Arc::new(UnloadedIndex::new(e.to_string()))
        }
    }
}
