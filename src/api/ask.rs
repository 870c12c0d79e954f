//! Question answering endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, AskParams, Json, Query};
use crate::domain::Answer;

/// GET /ask?question=...
pub async fn ask(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Result<Json<Answer>, ApiError> {
    let question = params
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Question must not be empty").with_param("question"))?;

    debug!(chars = question.chars().count(), "Answering question");

    let answer = state.answer_service.answer(question).await?;

    Ok(Json(answer))
}
