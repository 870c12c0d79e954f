//! Cache domain - answer cache abstraction

mod entry;
mod key;
mod repository;

pub use entry::{CachedAnswer, TtlPolicy};
pub use key::{ANSWER_NAMESPACE, answer_cache_key};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
