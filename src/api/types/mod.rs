//! HTTP request and response types

pub mod ask;
pub mod error;
pub mod json;
pub mod student;

pub use ask::AskParams;
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::{Json, Query};
pub use student::{
    DeleteStudentResponse, ListStudentsParams, ListStudentsResponse, SearchStudentsParams,
    StudentStatsResponse,
};
