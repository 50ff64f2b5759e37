// Resume-to-job matching engine.
// Pipeline: resume text → extractor → profile → scorer (per job) → ranker + gap analysis.
// Pure and synchronous; corpus loading and HTTP live outside this module.

pub mod engine;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod profile;
pub mod ranker;
pub mod scorer;
pub mod similarity;
pub mod weights;

pub use engine::MatchEngine;
pub use error::{MatchError, SkippedJob};
