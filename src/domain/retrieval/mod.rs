//! Retrieval domain - nearest-neighbor records and context assembly

mod context;
mod record;

use std::fmt::Debug;

pub use context::{NO_RECORDS_MARKER, build_context};
pub use record::RetrievedRecord;

use crate::domain::DomainError;

/// Precomputed vector index with a parallel record store
pub trait VectorIndex: Send + Sync + Debug {
    /// Dimension of the stored vectors
    fn dimension(&self) -> usize;

    /// Number of indexed records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `top_k` records ordered by ascending distance to `query`.
    /// Equal distances keep the records' original index order.
    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedRecord>, DomainError>;
}
