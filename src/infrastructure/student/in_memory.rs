//! In-memory student repository

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{CourseStats, DomainError, NewStudent, Student, StudentRepository, StudentUpdate};

#[derive(Debug, Default)]
struct Inner {
    students: BTreeMap<i32, Student>,
    next_id: i32,
}

/// Thread-safe in-memory implementation of StudentRepository
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    inner: RwLock<Inner>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with students, assigning ids from 1
    pub fn with_students(students: Vec<NewStudent>) -> Self {
        let repo = Self::new();
        {
            let mut inner = repo.inner.write().unwrap_or_else(|e| e.into_inner());

            for student in students {
                insert(&mut inner, student);
            }
        }
        repo
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, DomainError> {
        self.inner
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, DomainError> {
        self.inner
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }
}

fn insert(inner: &mut Inner, student: NewStudent) -> Student {
    inner.next_id += 1;
    let created = Student {
        user_id: inner.next_id,
        name: student.name,
        age: student.age,
        course: student.course,
    };
    inner.students.insert(created.user_id, created.clone());
    created
}

fn in_course(student: &Student, course: Option<&str>) -> bool {
    course.is_none_or(|c| student.course.eq_ignore_ascii_case(c.trim()))
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn count(&self, course: Option<&str>) -> Result<i64, DomainError> {
        let inner = self.read()?;
        Ok(inner.students.values().filter(|s| in_course(s, course)).count() as i64)
    }

    async fn list(
        &self,
        course: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Student>, DomainError> {
        let inner = self.read()?;
        Ok(inner
            .students
            .values()
            .filter(|s| in_course(s, course))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, user_id: i32) -> Result<Option<Student>, DomainError> {
        Ok(self.read()?.students.get(&user_id).cloned())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError> {
        let needle = name.trim().to_lowercase();
        let inner = self.read()?;

        Ok(inner
            .students
            .values()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn average_age(&self, course: Option<&str>) -> Result<Option<f64>, DomainError> {
        let inner = self.read()?;
        let ages: Vec<i32> = inner
            .students
            .values()
            .filter(|s| in_course(s, course))
            .map(|s| s.age)
            .collect();

        if ages.is_empty() {
            return Ok(None);
        }

        let total: i64 = ages.iter().map(|&a| a as i64).sum();
        Ok(Some(total as f64 / ages.len() as f64))
    }

    async fn course_statistics(&self) -> Result<Vec<CourseStats>, DomainError> {
        let inner = self.read()?;
        let mut by_course: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

        for student in inner.students.values() {
            let entry = by_course.entry(student.course.as_str()).or_default();
            entry.0 += 1;
            entry.1 += student.age as i64;
        }

        Ok(by_course
            .into_iter()
            .map(|(course, (count, total_age))| CourseStats {
                course: course.to_string(),
                student_count: count,
                average_age: total_age as f64 / count as f64,
            })
            .collect())
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let mut inner = self.write()?;
        Ok(insert(&mut inner, student))
    }

    async fn update(
        &self,
        user_id: i32,
        update: StudentUpdate,
    ) -> Result<Option<Student>, DomainError> {
        let mut inner = self.write()?;

        Ok(inner.students.get_mut(&user_id).map(|student| {
            update.apply(student);
            student.clone()
        }))
    }

    async fn delete(&self, user_id: i32) -> Result<bool, DomainError> {
        Ok(self.write()?.students.remove(&user_id).is_some())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.read().map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
