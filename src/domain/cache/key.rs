//! Cache key generation for answered questions

use sha2::{Digest, Sha256};

/// Namespace under which answers are stored
pub const ANSWER_NAMESPACE: &str = "answers";

/// Builds the cache key for an already-normalized question.
///
/// The question is hashed so that keys have a bounded length and contain no
/// characters that are special to the backing store.
pub fn answer_cache_key(normalized_question: &str) -> String {
    let digest = Sha256::digest(normalized_question.as_bytes());
    format!("{}:{}", ANSWER_NAMESPACE, hex::encode(digest))
}
