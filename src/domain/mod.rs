//! Domain layer - Core business logic and entities

pub mod adapter;
pub mod cache;
pub mod classifier;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod retrieval;
pub mod route;
pub mod search;
pub mod student;

pub use adapter::{Adapter, AdapterSet};
pub use cache::{Cache, CacheExt, CachedAnswer, TtlPolicy, answer_cache_key};
pub use classifier::{ClassifierConfig, IntentClassifier, KeywordClassifier, RuleGroup};
pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use generation::TextGenerator;
pub use retrieval::{NO_RECORDS_MARKER, RetrievedRecord, VectorIndex, build_context};
pub use route::{Answer, RouteLabel, normalize_question};
pub use search::{SearchHit, WebSearchProvider};
pub use student::{
    CourseStats, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, NewStudent, Student, StudentQuery,
    StudentRepository, StudentUpdate,
};
