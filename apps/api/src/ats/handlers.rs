//! Axum route handlers for the ATS API.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ats::extract::extract_resume_text;
use crate::ats::scoring::{preflight, ScoreRequest, ScoreResult};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    pub job_description_text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/keywords
///
/// Returns the keywords that a score request would be judged against.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    check_input_size(&state, request.job_description_text.len())?;

    let keywords = state
        .scorer
        .extract_keywords(&request.job_description_text)?;

    Ok(Json(KeywordsResponse {
        count: keywords.len(),
        keywords: keywords.into_vec(),
    }))
}

/// POST /api/v1/ats/score
///
/// Scores plain resume text against a job description.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    run_score(&state, &request).map(Json)
}

/// POST /api/v1/ats/score/upload
///
/// Multipart form: `resume` (PDF or text file) and `job_description` (text).
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut resume: Option<(Option<String>, Vec<u8>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                check_input_size(&state, bytes.len())?;
                resume = Some((filename, bytes.to_vec()));
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job_description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, bytes) =
        resume.ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let job_description_text = job_description
        .ok_or_else(|| AppError::Validation("Missing 'job_description' field".to_string()))?;

    // PDF parsing is CPU-bound; keep it off the async workers
    let resume_text =
        tokio::task::spawn_blocking(move || extract_resume_text(filename.as_deref(), &bytes))
            .await
            .context("Resume extraction task failed")??;

    let request = ScoreRequest {
        resume_text,
        job_description_text,
    };
    run_score(&state, &request).map(Json)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn run_score(state: &AppState, request: &ScoreRequest) -> Result<ScoreResponse, AppError> {
    check_input_size(
        state,
        request.resume_text.len() + request.job_description_text.len(),
    )?;

    if let Err(e) = preflight(request, &state.config.scorer) {
        debug!("Rejected score request: {e}");
        return Err(e.into());
    }

    let result = state.scorer.score(request)?;
    debug!(
        score = result.score,
        matched = result.matched_keywords.len(),
        missing = result.missing_keywords.len(),
        "Scored resume"
    );

    Ok(ScoreResponse {
        result,
        scorer_backend: state.scorer.backend().to_string(),
    })
}

fn check_input_size(state: &AppState, len: usize) -> Result<(), AppError> {
    let max = state.config.max_input_bytes;
    if len > max {
        return Err(AppError::PayloadTooLarge(format!(
            "Input is {len} bytes; the limit is {max} bytes"
        )));
    }
    Ok(())
}
