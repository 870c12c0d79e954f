//! Student records API types

use serde::{Deserialize, Serialize};

use crate::domain::{CourseStats, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, Student};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStudentsParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub course: Option<String>,
}

impl ListStudentsParams {
    pub fn limit(&self) -> usize {
        self.limit
            .map(|n| n.clamp(1, MAX_LIST_LIMIT))
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    pub fn course(&self) -> Option<&str> {
        self.course.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchStudentsParams {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListStudentsResponse {
    pub students: Vec<Student>,
    /// Matching students across all pages
    pub total: i64,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentStatsResponse {
    pub total_students: i64,
    pub average_age: Option<f64>,
    pub courses: Vec<CourseStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteStudentResponse {
    pub deleted: bool,
    pub user_id: i32,
}
