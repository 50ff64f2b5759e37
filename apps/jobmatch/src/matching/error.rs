use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole matching request.
///
/// A malformed job is not one of them: it is skipped and reported as a
/// [`SkippedJob`] while the rest of the corpus is still scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A job excluded from a ranking pass, with the reason it was excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedJob {
    pub job_id: String,
    pub reason: String,
}
