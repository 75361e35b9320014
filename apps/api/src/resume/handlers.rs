//! Axum route handler for the Resume API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::pipeline;
use crate::resume::generator::ResumeMarkdown;
use crate::resume::models::{ResumeRequest, ResumeResponse};
use crate::state::AppState;

/// POST /api/resume/generate
///
/// Turns structured profile data into a Markdown resume.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<ResumeResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let input = request.validate()?;

    info!(
        "Generating resume for user {} ({} roles, {} degrees, {} skills)",
        identity.user_id,
        input.experience.len(),
        input.education.len(),
        input.skills.len()
    );

    let resume = pipeline::run::<ResumeMarkdown>(&state.llm, &input).await?;
    if resume.trim().is_empty() {
        warn!(
            "Provider returned no resume text for user {}; responding with an empty resume",
            identity.user_id
        );
    } else {
        info!("Resume generated for user {}", identity.user_id);
    }

    Ok(Json(ResumeResponse { resume }))
}
