//! In-memory cache implementation using moka

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;

use crate::domain::DomainError;
use crate::domain::cache::Cache;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Longest eviction delay handed to moka. Entries with a longer TTL stay
/// until capacity eviction.
const MAX_EVICTION_DELAY: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized JSON value
    data: String,
    ttl: Duration,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

/// Evicts each entry after its own TTL; writes restart the clock
struct EntryExpiry;

impl EntryExpiry {
    fn delay(value: &CacheEntry) -> Option<Duration> {
        value.expires_at.map(|_| value.ttl.min(MAX_EVICTION_DELAY))
    }
}

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Self::delay(value)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Self::delay(value)
    }
}

/// Process-local cache with per-entry TTL and bounded capacity.
///
/// Entries do not survive a restart and are not shared between replicas.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { cache }
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.cache.get(key).await?;

        if entry.expires_at.is_some_and(|at| Instant::now() >= at) {
            self.cache.remove(key).await;
            return None;
        }

        Some(entry)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live_entry(key).await.map(|e| e.data))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let entry = CacheEntry {
            data: value.to_string(),
            ttl,
            expires_at: Instant::now().checked_add(ttl),
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.live_entry(key).await.is_some())
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
