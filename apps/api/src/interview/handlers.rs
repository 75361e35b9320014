//! Axum route handlers for the Interview API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interview::features::{AnswerFeedback, InterviewQuestions};
use crate::interview::models::{
    FeedbackRequest, FeedbackResponse, QuestionsRequest, QuestionsResponse,
};
use crate::pipeline;
use crate::state::AppState;

/// Counts above this are forwarded unchanged but logged.
const LARGE_QUESTION_COUNT: u32 = 50;

/// POST /api/interview/questions
///
/// Generates interview questions for a role/industry. Validation happens
/// before any provider call.
pub async fn handle_questions(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let input = request.validate()?;

    if input.question_count > LARGE_QUESTION_COUNT {
        warn!(
            "User {} requested {} questions; forwarding uncapped",
            identity.user_id, input.question_count
        );
    }
    info!(
        "Generating {} interview questions for user {} ({} / {})",
        input.question_count, identity.user_id, input.role, input.industry
    );

    let questions = pipeline::run::<InterviewQuestions>(&state.llm, &input).await?;

    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/interview/feedback
///
/// Scores one answer. Unparseable model output degrades to placeholder
/// feedback, never to an error.
pub async fn handle_feedback(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let input = request.validate()?;

    info!("Generating answer feedback for user {}", identity.user_id);

    let feedback = pipeline::run::<AnswerFeedback>(&state.llm, &input).await?;

    Ok(Json(FeedbackResponse { feedback }))
}
