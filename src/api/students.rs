//! Student records endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DeleteStudentResponse, Json, ListStudentsParams, ListStudentsResponse, Query,
    SearchStudentsParams, StudentStatsResponse,
};
use crate::domain::{NewStudent, Student, StudentUpdate};

/// GET /students
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<ListStudentsParams>,
) -> Result<Json<ListStudentsResponse>, ApiError> {
    let (limit, offset, course) = (params.limit(), params.offset(), params.course());
    debug!(limit, offset, course, "Listing students");

    let students = state.students.list(course, limit, offset).await?;
    let total = state.students.count(course).await?;

    Ok(Json(ListStudentsResponse {
        students,
        total,
        limit,
        offset,
    }))
}

/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<NewStudent>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    request.validate()?;

    let student = state.students.create(request).await?;
    info!(user_id = student.user_id, "Student created");

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /students/stats
pub async fn student_stats(
    State(state): State<AppState>,
) -> Result<Json<StudentStatsResponse>, ApiError> {
    let total_students = state.students.count(None).await?;
    let average_age = state.students.average_age(None).await?;
    let courses = state.students.course_statistics().await?;

    Ok(Json(StudentStatsResponse {
        total_students,
        average_age,
        courses,
    }))
}

/// GET /students/search?name=
pub async fn search_students(
    State(state): State<AppState>,
    Query(params): Query<SearchStudentsParams>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Name must not be empty").with_param("name"))?;

    let students = state.students.search_by_name(name).await?;

    Ok(Json(students))
}

/// GET /students/{user_id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Student>, ApiError> {
    let student = state
        .students
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student {} not found", user_id)))?;

    Ok(Json(student))
}

/// PUT /students/{user_id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(update): Json<StudentUpdate>,
) -> Result<Json<Student>, ApiError> {
    update.validate()?;

    let student = state
        .students
        .update(user_id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student {} not found", user_id)))?;

    info!(user_id, "Student updated");
    Ok(Json(student))
}

/// DELETE /students/{user_id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<DeleteStudentResponse>, ApiError> {
    if !state.students.delete(user_id).await? {
        return Err(ApiError::not_found(format!("Student {} not found", user_id)));
    }

    info!(user_id, "Student deleted");
    Ok(Json(DeleteStudentResponse {
        deleted: true,
        user_id,
    }))
}
