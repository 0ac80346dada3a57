//! Axum route handlers for the Generation API.
//!
//! Generation never fails from the client's point of view: every handler answers
//! 200 with content, tagged `live` or `fallback`. Only malformed requests are rejected.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{ContentSource, Generated, InterviewQaPair};
use crate::models::profile::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub profile: UserProfile,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub content: String,
    pub source: ContentSource,
    pub questions: Vec<InterviewQaPair>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Json<Generated> {
    Json(state.generator.resume(&request.profile).await)
}

/// POST /api/v1/generate/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<Generated>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    Ok(Json(
        state
            .generator
            .cover_letter(&request.profile, &request.job_description)
            .await,
    ))
}

/// POST /api/v1/generate/interview-questions
///
/// `content` is the raw JSON array text; `questions` is the same array parsed.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Json<InterviewQuestionsResponse> {
    let generated = state.generator.interview_questions(&request.profile).await;
    // Live items that are not objects parse to nothing; content still carries them.
    let questions = serde_json::from_str(&generated.content).unwrap_or_default();

    Json(InterviewQuestionsResponse {
        content: generated.content,
        source: generated.source,
        questions,
    })
}

/// POST /api/v1/generate/market-insights
pub async fn handle_market_insights(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Json<Generated> {
    Json(state.generator.market_insights(&request.profile).await)
}
