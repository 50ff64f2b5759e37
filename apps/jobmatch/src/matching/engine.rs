//! `MatchEngine` holds the lexicon plus validated settings, shared by every request.
//!
//! Holds no mutable state: each call is a pure function of its arguments, so
//! one `Arc<MatchEngine>` serves any number of concurrent scoring passes.

use std::sync::Arc;

use crate::lexicon::SkillLexicon;
use crate::matching::error::MatchError;
use crate::matching::profile::{CandidateProfile, ProfileBuilder};
use crate::matching::ranker::{rank, RankingOutcome};
use crate::matching::scorer::{score_job, MatchResult};
use crate::matching::similarity::{similar_jobs, SimilarJob};
use crate::matching::weights::EngineSettings;
use crate::models::job::Job;

#[derive(Debug)]
pub struct MatchEngine {
    lexicon: Arc<SkillLexicon>,
    settings: EngineSettings,
}

impl MatchEngine {
    /// Fails with `Configuration` when the settings cannot produce a score.
    pub fn new(lexicon: Arc<SkillLexicon>, settings: EngineSettings) -> Result<Self, MatchError> {
        settings.validate()?;
        Ok(Self { lexicon, settings })
    }

    pub fn build_profile(&self, builder: ProfileBuilder) -> Result<CandidateProfile, MatchError> {
        builder.build(&self.lexicon)
    }

    pub fn score(&self, profile: &CandidateProfile, job: &Job) -> Result<MatchResult, MatchError> {
        score_job(profile, job, &self.lexicon, &self.settings)
    }

    pub fn rank(
        &self,
        profile: &CandidateProfile,
        jobs: &[Job],
        limit: usize,
    ) -> Result<RankingOutcome, MatchError> {
        rank(profile, jobs, &self.lexicon, &self.settings, limit)
    }

    pub fn similar(&self, reference: &Job, jobs: &[Job], limit: usize) -> Vec<SimilarJob> {
        similar_jobs(
            reference,
            jobs,
            &self.lexicon,
            self.settings.similar_min_score,
            limit,
        )
    }
}
