//! Question answering: cache, classify, dispatch

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::cache::{Cache, CacheExt, CachedAnswer, TtlPolicy, answer_cache_key};
use crate::domain::{AdapterSet, Answer, DomainError, IntentClassifier, normalize_question};
use crate::infrastructure::observability::{
    record_adapter_error, record_ask, record_cache_unavailable,
};

/// Answers questions by routing them to exactly one source, caching each
/// answer under its normalized question for the TTL of its source.
///
/// Concurrent misses for the same question are not coordinated; both
/// compute and the later write wins.
#[derive(Debug, Clone)]
pub struct AnswerService {
    classifier: Arc<dyn IntentClassifier>,
    adapters: AdapterSet,
    cache: Arc<dyn Cache>,
    ttl_policy: TtlPolicy,
}

impl AnswerService {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        adapters: AdapterSet,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            classifier,
            adapters,
            cache,
            ttl_policy: TtlPolicy::default(),
        }
    }

    pub fn with_ttl_policy(mut self, ttl_policy: TtlPolicy) -> Self {
        self.ttl_policy = ttl_policy;
        self
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub async fn answer(&self, question: &str) -> Result<Answer, DomainError> {
        let started = Instant::now();
        let question = question.trim();

        if question.is_empty() {
            return Err(DomainError::invalid_input("Question must not be empty"));
        }

        let normalized = normalize_question(question);
        let key = answer_cache_key(&normalized);

        if let Some(entry) = self.lookup(&key).await {
            debug!(source = %entry.source, "Answer served from cache");
            record_ask(entry.source, true, started.elapsed());
            return Ok(Answer::from_cache(entry.source, entry.answer));
        }

        let label = self.classifier.classify(&normalized);
        let adapter = self.adapters.get(label);

        info!(
            source = %label,
            backend = adapter.backend_name(),
            classifier = self.classifier.name(),
            "Routing question"
        );

        let text = match adapter.answer(question).await {
            Ok(text) => text,
            Err(e) => {
                let e = e.with_origin(label.source_tag());
                if matches!(e, DomainError::AdapterRejected { .. }) {
                    warn!(source = %label, error = %e, "Question rejected by adapter");
                } else {
                    error!(source = %label, error = %e, "Adapter failed");
                }
                record_adapter_error(label, e.kind());
                return Err(e);
            }
        };

        self.store(&key, CachedAnswer::new(normalized, label, text.clone()))
            .await;

        record_ask(label, false, started.elapsed());
        Ok(Answer::fresh(label, text))
    }

    async fn lookup(&self, key: &str) -> Option<CachedAnswer> {
        match self.cache.get::<CachedAnswer>(key).await {
            Ok(Some(entry)) if entry.is_fresh(&self.ttl_policy, Utc::now()) => Some(entry),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Cache read failed, continuing without cache");
                record_cache_unavailable("read");
                None
            }
        }
    }

    async fn store(&self, key: &str, entry: CachedAnswer) {
        let ttl = self.ttl_policy.ttl_for(entry.source);

        if let Err(e) = self.cache.set(key, &entry, ttl).await {
            warn!(error = %e, "Cache write failed, answer not cached");
            record_cache_unavailable("write");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteLabel;
    use crate::domain::adapter::mock::{MockAdapter, adapter_set};
    use crate::domain::cache::MockCache;
    use crate::domain::classifier::mock::FixedClassifier;
    use crate::domain::{ClassifierConfig, KeywordClassifier};
    use crate::infrastructure::cache::InMemoryCache;
    use std::time::Duration;

    fn service_with(label: RouteLabel, cache: Arc<dyn Cache>) -> (AnswerService, [Arc<MockAdapter>; 4]) {
        let (adapters, mocks) = adapter_set();
        let service = AnswerService::new(Arc::new(FixedClassifier(label)), adapters, cache);
        (service, mocks)
    }

    #[tokio::test]
    async fn test_fresh_answer_then_cached() {
        let cache = Arc::new(MockCache::new());
        let (service, mocks) = service_with(RouteLabel::Web, cache.clone());

        let first = service.answer("What is the weather today?").await.unwrap();
        let second = service.answer("  what is the WEATHER   today? ").await.unwrap();

        assert_eq!(first, Answer::fresh(RouteLabel::Web, "web answer"));
        assert_eq!(second, Answer::from_cache(RouteLabel::Web, "web answer"));
        assert_eq!(mocks[1].calls(), 1);
        assert_eq!(cache.reads(), 2);
        assert_eq!(cache.writes(), 1);
    }

    #[tokio::test]
    async fn test_ttl_depends_on_source() {
        let cache = Arc::new(MockCache::new());
        let (service, _) = service_with(RouteLabel::Retrieval, cache.clone());

        service.answer("common crimes in la").await.unwrap();

        let key = answer_cache_key("common crimes in la");
        assert_eq!(cache.stored_ttl(&key), Some(Duration::from_secs(1800)));
    }

    #[tokio::test]
    async fn test_empty_question_touches_nothing() {
        let cache = Arc::new(MockCache::new());
        let (service, mocks) = service_with(RouteLabel::General, cache.clone());

        let result = service.answer("   \t ").await;

        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));
        assert_eq!(cache.reads(), 0);
        assert_eq!(cache.writes(), 0);
        assert!(mocks.iter().all(|m| m.calls() == 0));
    }

    #[tokio::test]
    async fn test_adapter_failure_is_tagged_and_not_cached() {
        let cache = Arc::new(MockCache::new());
        let (mut adapters, _) = adapter_set();
        adapters.retrieval = Arc::new(MockAdapter::unavailable("ollama", "connection refused"));
        let service = AnswerService::new(
            Arc::new(FixedClassifier(RouteLabel::Retrieval)),
            adapters,
            cache.clone(),
        );

        let result = service.answer("crimes downtown").await;

        match result {
            Err(DomainError::AdapterUnavailable { origin, message }) => {
                assert_eq!(origin, "rag");
                assert!(message.contains("ollama"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(cache.writes(), 0);
    }

    #[tokio::test]
    async fn test_internal_adapter_error_is_attributed_to_source() {
        let cache = Arc::new(MockCache::new());
        let (mut adapters, _) = adapter_set();
        adapters.structured = Arc::new(MockAdapter::failing("postgres", "relation missing"));
        let service = AnswerService::new(
            Arc::new(FixedClassifier(RouteLabel::Structured)),
            adapters,
            cache.clone(),
        );

        let result = service.answer("how many students are enrolled").await;

        match result {
            Err(DomainError::AdapterUnavailable { origin, message }) => {
                assert_eq!(origin, "student");
                assert_eq!(message, "relation missing");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(cache.writes(), 0);
    }

    #[tokio::test]
    async fn test_rejection_keeps_kind() {
        let (mut adapters, _) = adapter_set();
        adapters.structured = Arc::new(MockAdapter::rejecting("postgres", "unrecognized"));
        let service = AnswerService::new(
            Arc::new(FixedClassifier(RouteLabel::Structured)),
            adapters,
            Arc::new(MockCache::new()),
        );

        let result = service.answer("students?").await;

        assert!(matches!(
            result,
            Err(DomainError::AdapterRejected { ref origin, .. }) if origin == "student"
        ));
    }

    #[tokio::test]
    async fn test_cache_outage_degrades_to_uncached() {
        let cache = Arc::new(MockCache::new().with_error("connection reset"));
        let (service, mocks) = service_with(RouteLabel::General, cache);

        let first = service.answer("tell me a joke").await.unwrap();
        let second = service.answer("tell me a joke").await.unwrap();

        assert!(!first.cached);
        assert!(!second.cached);
        assert_eq!(mocks[3].calls(), 2);
    }

    #[tokio::test]
    async fn test_entry_expires_after_source_ttl() {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let (adapters, mocks) = adapter_set();
        let policy = TtlPolicy {
            web: Duration::from_millis(50),
            ..TtlPolicy::default()
        };
        let service = AnswerService::new(
            Arc::new(FixedClassifier(RouteLabel::Web)),
            adapters,
            cache,
        )
        .with_ttl_policy(policy);

        service.answer("latest news").await.unwrap();
        assert!(service.answer("latest news").await.unwrap().cached);

        tokio::time::sleep(Duration::from_millis(100)).await;
        mocks[1].set_answer("newer web answer");

        let after = service.answer("latest news").await.unwrap();
        assert!(!after.cached);
        assert_eq!(after.answer, "newer web answer");
        assert_eq!(mocks[1].calls(), 2);
    }

    #[tokio::test]
    async fn test_huge_ttl_serves_from_cache() {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let (adapters, mocks) = adapter_set();
        let service = AnswerService::new(
            Arc::new(FixedClassifier(RouteLabel::General)),
            adapters,
            cache,
        )
        .with_ttl_policy(TtlPolicy::uniform(Duration::from_secs(10_000_000_000_000)));

        assert!(!service.answer("q").await.unwrap().cached);
        assert!(service.answer("q").await.unwrap().cached);
        assert_eq!(mocks[3].calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_under_shorter_policy_is_ignored() {
        let mut entry = CachedAnswer::new("old question", RouteLabel::Web, "old answer");
        entry.created_at = Utc::now() - chrono::Duration::seconds(600);
        let key = answer_cache_key("old question");
        let cache = Arc::new(MockCache::new().with_entry(&key, &entry, Duration::from_secs(3600)));
        let (service, mocks) = service_with(RouteLabel::Web, cache);

        let answer = service.answer("old question").await.unwrap();

        assert!(!answer.cached);
        assert_eq!(mocks[1].calls(), 1);
    }

    #[tokio::test]
    async fn test_routes_with_keyword_classifier() {
        let classifier = KeywordClassifier::new(&ClassifierConfig::default()).unwrap();
        let (adapters, mocks) = adapter_set();
        let service = AnswerService::new(
            Arc::new(classifier),
            adapters,
            Arc::new(MockCache::new()),
        );

        let answer = service.answer("How many students are enrolled?").await.unwrap();

        assert_eq!(answer.source, RouteLabel::Structured);
        assert_eq!(answer.answer, "structured answer");
        assert_eq!(mocks[0].calls(), 1);
    }
}
