//! Placeholder for an index that failed to load

use crate::domain::{DomainError, RetrievedRecord, VectorIndex};

/// Stands in for the index when its files could not be read at startup, so
/// the other routes keep serving. Every search reports the retrieval route
/// as unavailable.
#[derive(Debug, Clone)]
pub struct UnloadedIndex {
    reason: String,
}

impl UnloadedIndex {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl VectorIndex for UnloadedIndex {
    fn dimension(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }

    fn search(&self, _query: &[f32], _top_k: usize) -> Result<Vec<RetrievedRecord>, DomainError> {
        Err(DomainError::unavailable(
            "vector-index",
            format!("Index not loaded: {}", self.reason),
        ))
    }
}
