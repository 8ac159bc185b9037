use anyhow::{Context, Result};
use std::str::FromStr;

use crate::ats::keywords::MatchMode;
use crate::ats::scoring::ScorerConfig;

const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on resume + job description bytes accepted per request.
    pub max_input_bytes: usize,
    pub scorer: ScorerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScorerConfig::default();

        let scorer = ScorerConfig {
            min_keyword_len: parse_or(&lookup, "ATS_MIN_KEYWORD_LEN", defaults.min_keyword_len)?,
            min_job_description_len: parse_or(
                &lookup,
                "ATS_MIN_JOB_DESCRIPTION_LEN",
                defaults.min_job_description_len,
            )?,
            min_resume_len: parse_or(&lookup, "ATS_MIN_RESUME_LEN", defaults.min_resume_len)?,
            min_resume_lines: parse_or(&lookup, "ATS_MIN_RESUME_LINES", defaults.min_resume_lines)?,
            target_score: parse_or(&lookup, "ATS_TARGET_SCORE", defaults.target_score)?,
            max_listed_keywords: parse_or(
                &lookup,
                "ATS_MAX_LISTED_KEYWORDS",
                defaults.max_listed_keywords,
            )?,
            match_mode: parse_or(&lookup, "ATS_MATCH_MODE", MatchMode::default())?,
        };

        if scorer.min_keyword_len == 0 {
            anyhow::bail!("ATS_MIN_KEYWORD_LEN must be at least 1");
        }
        if scorer.target_score > 100 {
            anyhow::bail!("ATS_TARGET_SCORE must be between 0 and 100");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_input_bytes: parse_or(&lookup, "MAX_INPUT_BYTES", DEFAULT_MAX_INPUT_BYTES)?,
            scorer,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
    }
}
