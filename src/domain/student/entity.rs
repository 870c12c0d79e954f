//! Student entity and request types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const MAX_NAME_LENGTH: usize = 255;
const MAX_COURSE_LENGTH: usize = 255;
const MIN_AGE: i32 = 1;
const MAX_AGE: i32 = 150;

/// A row of the `students` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub user_id: i32,
    pub name: String,
    pub age: i32,
    pub course: String,
}

/// Fields for a new student
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub course: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, age: i32, course: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            course: course.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_age(self.age)?;
        validate_course(&self.course)
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub course: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.course.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation("No valid fields to update"));
        }

        if let Some(ref name) = self.name {
            validate_name(name)?;
        }

        if let Some(age) = self.age {
            validate_age(age)?;
        }

        if let Some(ref course) = self.course {
            validate_course(course)?;
        }

        Ok(())
    }

    pub fn apply(&self, student: &mut Student) {
        if let Some(ref name) = self.name {
            student.name = name.clone();
        }

        if let Some(age) = self.age {
            student.age = age;
        }

        if let Some(ref course) = self.course {
            student.course = course.clone();
        }
    }
}

/// Enrollment figures for one course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStats {
    pub course: String,
    pub student_count: i64,
    pub average_age: f64,
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Student name cannot be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Student name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

fn validate_course(course: &str) -> Result<(), DomainError> {
    if course.trim().is_empty() {
        return Err(DomainError::validation("Course cannot be empty"));
    }

    if course.len() > MAX_COURSE_LENGTH {
        return Err(DomainError::validation(format!(
            "Course cannot exceed {} characters",
            MAX_COURSE_LENGTH
        )));
    }

    Ok(())
}

fn validate_age(age: i32) -> Result<(), DomainError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(DomainError::validation(format!(
            "Age must be between {} and {}",
            MIN_AGE, MAX_AGE
        )));
    }

    Ok(())
}
