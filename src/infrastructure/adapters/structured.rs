//! Structured source: student questions answered from the database

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::student::answer;
use crate::domain::{Adapter, DomainError, StudentQuery, StudentRepository};

/// Translates a question into one of the recognized student queries and
/// formats the result
#[derive(Debug)]
pub struct StructuredAdapter {
    repository: Arc<dyn StudentRepository>,
}

impl StructuredAdapter {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    async fn execute(&self, query: &StudentQuery) -> Result<String, DomainError> {
        let repo = &self.repository;

        let text = match query {
            StudentQuery::CountAll => answer::count_answer(repo.count(None).await?, None),
            StudentQuery::CountByCourse(course) => {
                answer::count_answer(repo.count(Some(course)).await?, Some(course))
            }
            StudentQuery::ListAll { limit } => {
                answer::list_answer(&repo.list(None, *limit, 0).await?, None)
            }
            StudentQuery::ListByCourse { course, limit } => {
                answer::list_answer(&repo.list(Some(course), *limit, 0).await?, Some(course))
            }
            StudentQuery::FindByName(name) => {
                answer::name_answer(&repo.search_by_name(name).await?, name)
            }
            StudentQuery::GetById(id) => answer::student_answer(repo.get(*id).await?.as_ref(), *id),
            StudentQuery::AverageAge(course) => answer::average_age_answer(
                repo.average_age(course.as_deref()).await?,
                course.as_deref(),
            ),
            StudentQuery::CourseStatistics => {
                answer::statistics_answer(&repo.course_statistics().await?)
            }
        };

        Ok(text)
    }
}

#[async_trait]
impl Adapter for StructuredAdapter {
    async fn answer(&self, question: &str) -> Result<String, DomainError> {
        let query = StudentQuery::parse(question)?;
        debug!(?query, "Parsed student query");

        self.execute(&query).await
    }

    fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }
}
