//! Student domain - enrollment records behind the structured source

pub mod answer;
mod entity;
mod query;
mod repository;

pub use entity::{CourseStats, NewStudent, Student, StudentUpdate};
pub use query::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, StudentQuery};
pub use repository::StudentRepository;
