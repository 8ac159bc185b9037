//! Compatibility scoring — measures lexical overlap between a resume and a job description.
//!
//! Default: `KeywordCompatibilityScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn CompatibilityScorer>`, chosen at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ats::feedback::{formatting_issues, optimization_tips};
use crate::ats::keywords::{contains_keyword, extract_keywords, KeywordSet, MatchMode};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Thresholds used by keyword extraction, validation and feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    pub min_keyword_len: usize,
    /// Measured in chars after trimming surrounding whitespace.
    pub min_job_description_len: usize,
    pub min_resume_len: usize,
    pub min_resume_lines: usize,
    pub target_score: u32,
    pub max_listed_keywords: usize,
    pub match_mode: MatchMode,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: 4,
            min_job_description_len: 50,
            min_resume_len: 200,
            min_resume_lines: 10,
            target_score: 70,
            max_listed_keywords: 5,
            match_mode: MatchMode::Substring,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request / result / error types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_description_text: String,
}

/// Outcome of a scoring call. `matched_keywords` and `missing_keywords`
/// partition the extracted keyword set, both in job-description order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
    pub optimization_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Job description is too generic to analyze: no words of {min_keyword_len} or more characters")]
    DegenerateInput { min_keyword_len: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The scorer trait. Implement this to swap backends without touching handlers.
pub trait CompatibilityScorer: Send + Sync {
    fn extract_keywords(&self, job_description_text: &str) -> Result<KeywordSet, ScoreError>;

    fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoreError>;

    /// Short label reported alongside results, e.g. "keyword".
    fn backend(&self) -> &'static str;
}

/// Substring/word-boundary keyword scorer.
#[derive(Debug, Clone, Default)]
pub struct KeywordCompatibilityScorer {
    pub config: ScorerConfig,
}

impl KeywordCompatibilityScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }
}

impl CompatibilityScorer for KeywordCompatibilityScorer {
    fn extract_keywords(&self, job_description_text: &str) -> Result<KeywordSet, ScoreError> {
        keywords_for(&self.config, job_description_text)
    }

    fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoreError> {
        score_with(
            &self.config,
            &request.resume_text,
            &request.job_description_text,
        )
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Checks the length preconditions that do not require tokenizing.
///
/// Handlers run this before scoring so bad input is rejected with the same
/// thresholds the scorer enforces.
pub fn preflight(request: &ScoreRequest, config: &ScorerConfig) -> Result<(), ScoreError> {
    if request.resume_text.trim().is_empty() {
        return Err(ScoreError::InvalidInput(
            "resume text cannot be empty".to_string(),
        ));
    }
    check_job_description_len(&request.job_description_text, config)
}

fn check_job_description_len(text: &str, config: &ScorerConfig) -> Result<(), ScoreError> {
    let len = text.trim().chars().count();
    if len < config.min_job_description_len {
        return Err(ScoreError::InvalidInput(format!(
            "job description must be at least {} characters (got {len})",
            config.min_job_description_len
        )));
    }
    Ok(())
}

/// Extracts keywords, rejecting a blank description as invalid and one
/// without qualifying tokens as degenerate.
fn keywords_for(config: &ScorerConfig, job_description_text: &str) -> Result<KeywordSet, ScoreError> {
    if job_description_text.trim().is_empty() {
        return Err(ScoreError::InvalidInput(
            "job description cannot be empty".to_string(),
        ));
    }
    let keywords = extract_keywords(job_description_text, config.min_keyword_len);
    if keywords.is_empty() {
        return Err(ScoreError::DegenerateInput {
            min_keyword_len: config.min_keyword_len,
        });
    }
    Ok(keywords)
}

/// Scores a resume against a job description.
///
/// Check order: empty resume, blank description, then degenerate keyword
/// set, then description length. A non-blank description made only of
/// short words is reported as degenerate even when it is also short.
pub fn score_with(
    config: &ScorerConfig,
    resume_text: &str,
    job_description_text: &str,
) -> Result<ScoreResult, ScoreError> {
    if resume_text.trim().is_empty() {
        return Err(ScoreError::InvalidInput(
            "resume text cannot be empty".to_string(),
        ));
    }

    let keywords = keywords_for(config, job_description_text)?;

    check_job_description_len(job_description_text, config)?;

    let resume_lower = resume_text.to_lowercase();
    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = keywords
        .into_vec()
        .into_iter()
        .partition(|kw| contains_keyword(&resume_lower, kw, config.match_mode));

    let total = matched_keywords.len() + missing_keywords.len();
    let score = ((matched_keywords.len() as f64 / total as f64) * 100.0).round() as u32;

    let formatting_issues = formatting_issues(resume_text, config);
    let optimization_tips =
        optimization_tips(score, &missing_keywords, &formatting_issues, config);

    Ok(ScoreResult {
        score,
        matched_keywords,
        missing_keywords,
        formatting_issues,
        optimization_tips,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
