use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{dto::quiz_dto::QuizQuery, error::Result, AppState};

#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    query: std::result::Result<Query<QuizQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    query.validate()?;
    let topic = query.topic_or(&state.default_topic);

    // `next` only asks for another question on the same topic; nothing is
    // remembered between calls, so it behaves like a fresh request.
    tracing::debug!(topic, next = query.is_next(), "Quiz question requested");

    let question = state
        .ai_service
        .generate_question(topic, state.question_ids.next_id())
        .await?;

    Ok(Json(question))
}
