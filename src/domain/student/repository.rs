//! Student repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{CourseStats, NewStudent, Student, StudentUpdate};
use crate::domain::DomainError;

/// Backing store for the `students` collection.
///
/// Course and name comparisons are case-insensitive.
#[async_trait]
pub trait StudentRepository: Send + Sync + Debug {
    /// Number of students, optionally restricted to one course
    async fn count(&self, course: Option<&str>) -> Result<i64, DomainError>;

    /// Students ordered by id
    async fn list(
        &self,
        course: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Student>, DomainError>;

    async fn get(&self, user_id: i32) -> Result<Option<Student>, DomainError>;

    /// Students whose name contains `name`
    async fn search_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError>;

    /// Average age, `None` when no student matches
    async fn average_age(&self, course: Option<&str>) -> Result<Option<f64>, DomainError>;

    /// Per-course counts and average ages, ordered by course
    async fn course_statistics(&self) -> Result<Vec<CourseStats>, DomainError>;

    async fn create(&self, student: NewStudent) -> Result<Student, DomainError>;

    /// Returns `None` if the student does not exist
    async fn update(
        &self,
        user_id: i32,
        update: StudentUpdate,
    ) -> Result<Option<Student>, DomainError>;

    /// Returns `true` if a student was deleted
    async fn delete(&self, user_id: i32) -> Result<bool, DomainError>;

    /// Verifies the store is reachable
    async fn health_check(&self) -> Result<(), DomainError>;

    fn backend_name(&self) -> &'static str;
}
