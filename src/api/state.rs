//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Cache, StudentRepository, VectorIndex};
use crate::infrastructure::services::AnswerService;

/// Handles shared by every request. Built once at startup and cloned per
/// request; every field is a cheap `Arc` clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    pub students: Arc<dyn StudentRepository>,
    pub cache: Arc<dyn Cache>,
    pub index: Arc<dyn VectorIndex>,
}

impl AppState {
    pub fn new(
        answer_service: AnswerService,
        students: Arc<dyn StudentRepository>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        let cache = answer_service.cache().clone();

        Self {
            answer_service: Arc::new(answer_service),
            students,
            cache,
            index,
        }
    }
}
