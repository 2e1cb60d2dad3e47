use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::interview::bank::{self, BANK_SIZE};
use crate::interview::report::{legacy_classify, Glyph, LegacyAnswerRecord};
use crate::interview::service::{InterviewResult, IssuedQuestion, NextQuestion, ServiceStats};
use crate::models::question::QuestionCategory;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub token: String,
}

/// POST /api/v1/session
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let token = state.interviews.create_session().await;
    Ok(Json(CreateSessionResponse { token }))
}

#[derive(Serialize)]
pub struct NextQuestionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<IssuedQuestion>,
    pub total_questions: usize,
    pub remaining_questions: usize,
    pub completed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ai_generated: bool,
}

/// POST /api/v1/interview/question/:token
pub async fn handle_next_question(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<NextQuestionResponse>, ApiError> {
    let response = match state.interviews.next_question(&token).await? {
        NextQuestion::Issued {
            question,
            remaining,
            ai_generated,
        } => NextQuestionResponse {
            question: Some(question),
            total_questions: BANK_SIZE,
            remaining_questions: remaining,
            completed: false,
            ai_generated,
        },
        NextQuestion::Completed { .. } => NextQuestionResponse {
            question: None,
            total_questions: BANK_SIZE,
            remaining_questions: 0,
            completed: true,
            ai_generated: false,
        },
    };
    Ok(Json(response))
}

#[derive(Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: String,
}

#[derive(Serialize)]
pub struct SubmitAnswerResponse {
    pub accepted: bool,
    pub answers_saved: usize,
    pub total_questions: usize,
    pub remaining_questions: usize,
}

/// POST /api/v1/session/:token/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, ApiError> {
    let receipt = state
        .interviews
        .submit_answer(&token, &req.question_id, &req.answer)
        .await?;
    Ok(Json(SubmitAnswerResponse {
        accepted: true,
        answers_saved: receipt.answers_saved,
        total_questions: BANK_SIZE,
        remaining_questions: receipt.remaining,
    }))
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub questions_answered: usize,
    pub questions_asked: usize,
    pub total_questions: usize,
    pub current_performance: u32,
}

/// GET /api/v1/session/:token
pub async fn handle_get_status(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.interviews.status(&token).await?;
    Ok(Json(StatusResponse {
        token,
        created_at: status.created_at,
        completed: status.completed,
        questions_answered: status.questions_answered,
        questions_asked: status.questions_asked,
        total_questions: status.total_questions,
        current_performance: status.current_performance,
    }))
}

#[derive(Serialize)]
pub struct CompleteResponse {
    pub completed: bool,
}

/// POST /api/v1/session/:token/complete
pub async fn handle_complete_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<CompleteResponse>, ApiError> {
    state.interviews.complete(&token).await?;
    Ok(Json(CompleteResponse { completed: true }))
}

/// POST /api/v1/interview/glyph/:token
pub async fn handle_glyph(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Glyph>, ApiError> {
    Ok(Json(state.interviews.glyph(&token).await?))
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/v1/interview/summary/:token
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.interviews.summary(&token).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// GET /api/v1/result/:token
pub async fn handle_result(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InterviewResult>, ApiError> {
    Ok(Json(state.interviews.result(&token).await?))
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<ServiceStats> {
    Json(state.interviews.stats().await)
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy endpoints — token-less callers, retained for backward compatibility
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LegacyGlyphRequest {
    #[serde(default)]
    pub results: Vec<LegacyAnswerRecord>,
}

/// POST /api/v1/interview/glyph
/// Classifies by raw answer length only; see `report::legacy_classify`.
pub async fn handle_legacy_glyph(Json(req): Json<LegacyGlyphRequest>) -> Json<Glyph> {
    Json(legacy_classify(&req.results))
}

#[derive(Deserialize)]
pub struct LegacyHistoryRequest {
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

#[derive(Serialize)]
pub struct LegacyQuestion {
    pub text: &'static str,
    pub category: QuestionCategory,
}

#[derive(Serialize)]
pub struct LegacyQuestionsResponse {
    pub questions: Vec<LegacyQuestion>,
    pub total_questions: usize,
    pub remaining_questions: usize,
}

/// POST /api/v1/interview/question
/// Returns every question the caller has not yet seen, judged purely by how
/// many history entries were sent.
pub async fn handle_legacy_questions(
    Json(req): Json<LegacyHistoryRequest>,
) -> Json<LegacyQuestionsResponse> {
    let seen = req.history.len().min(BANK_SIZE);
    let questions: Vec<LegacyQuestion> = bank::all()[seen..]
        .iter()
        .map(|q| LegacyQuestion {
            text: q.text,
            category: q.category,
        })
        .collect();

    Json(LegacyQuestionsResponse {
        remaining_questions: questions.len(),
        total_questions: BANK_SIZE,
        questions,
    })
}

#[derive(Serialize)]
pub struct LegacySummaryResponse {
    pub summary: String,
    pub recommendation: String,
}

/// POST /api/v1/interview/summary
pub async fn handle_legacy_summary(
    Json(req): Json<LegacyHistoryRequest>,
) -> Json<LegacySummaryResponse> {
    if req.history.is_empty() {
        return Json(LegacySummaryResponse {
            summary: "Not enough data for an analysis.".to_string(),
            recommendation: "Answer the interview questions first.".to_string(),
        });
    }

    Json(LegacySummaryResponse {
        summary: format!(
            "The candidate answered {} questions and showed baseline professional skills.",
            req.history.len()
        ),
        recommendation: "Recommended for further review.".to_string(),
    })
}
