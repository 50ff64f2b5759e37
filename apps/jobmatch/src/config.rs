use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::matching::weights::{EngineSettings, ScoringWeights};

/// Application configuration loaded from environment variables.
/// Every variable is optional; bad values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jobs_path: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub engine: EngineSettings,
    /// Result count when a match request gives no limit.
    pub max_recommendations: usize,
    pub resume_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineSettings::default();
        let engine = EngineSettings {
            weights: ScoringWeights {
                skill: parse_or(&lookup, "SKILL_WEIGHT", defaults.weights.skill)?,
                experience: parse_or(&lookup, "EXPERIENCE_WEIGHT", defaults.weights.experience)?,
                location: parse_or(&lookup, "LOCATION_WEIGHT", defaults.weights.location)?,
                role: parse_or(&lookup, "ROLE_WEIGHT", defaults.weights.role)?,
            },
            experience_decay_per_year: parse_or(
                &lookup,
                "EXPERIENCE_DECAY_PER_YEAR",
                defaults.experience_decay_per_year,
            )?,
            min_score: parse_or(&lookup, "MIN_MATCH_SCORE", defaults.min_score)?,
            gap_top_k: parse_or(&lookup, "GAP_TOP_K", defaults.gap_top_k)?,
            gap_limit: parse_or(&lookup, "GAP_LIMIT", defaults.gap_limit)?,
            similar_min_score: parse_or(&lookup, "SIMILAR_MIN_SCORE", defaults.similar_min_score)?,
        };
        engine.validate().context("Invalid matching configuration")?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            jobs_path: lookup("JOBS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("jobs_data.json")),
            lexicon_path: lookup("LEXICON_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            engine,
            max_recommendations: parse_or(&lookup, "MAX_RECOMMENDATIONS", 10)?,
            resume_max_bytes: parse_or(&lookup, "RESUME_MAX_BYTES", 1024 * 1024)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        _ => Ok(default),
    }
}
