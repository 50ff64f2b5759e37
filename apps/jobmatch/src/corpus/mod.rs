//! Job corpus: versioned, immutable snapshots of the postings the engine scores.
//!
//! Readers clone an `Arc<CorpusSnapshot>` and keep it for the whole pass; a
//! refresh builds a complete new snapshot and swaps the pointer, so a ranking
//! pass never observes a half-loaded corpus.

pub mod handlers;
pub mod record;
pub mod source;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::lexicon::SkillLexicon;
use crate::matching::ranker::compare_recency;
use crate::models::job::{Job, JobPlatform};
use source::JobSource;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read jobs from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse jobs from {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CorpusSnapshot {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub jobs: Vec<Job>,
    /// Source entries that could not be decoded into a record.
    pub rejected_records: usize,
}

/// Filters for the job listing endpoint. All optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    /// Case-insensitive text matched against title, company, description and skills.
    pub q: Option<String>,
    pub platform: Option<JobPlatform>,
    pub location: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillDemand {
    pub skill: String,
    pub jobs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub job_count: usize,
    pub rejected_records: usize,
    pub remote_jobs: usize,
    pub jobs_by_platform: BTreeMap<&'static str, usize>,
    pub top_skills: Vec<SkillDemand>,
}

pub const DEFAULT_QUERY_LIMIT: usize = 50;
pub const MAX_QUERY_LIMIT: usize = 1000;

impl CorpusSnapshot {
    pub fn empty() -> Self {
        Self {
            version: 0,
            loaded_at: Utc::now(),
            jobs: Vec::new(),
            rejected_records: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.job_id == job_id)
    }

    /// Filtered listing, newest posting first.
    pub fn query(&self, query: &JobQuery) -> Vec<Job> {
        let needle = query
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let location = query
            .location
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty());
        let limit = query
            .limit
            .unwrap_or(DEFAULT_QUERY_LIMIT)
            .min(MAX_QUERY_LIMIT);

        let mut hits: Vec<&Job> = self
            .jobs
            .iter()
            .filter(|job| query.platform.map_or(true, |p| job.platform == p))
            .filter(|job| {
                location
                    .as_deref()
                    .map_or(true, |l| job.location.to_lowercase().contains(l))
            })
            .filter(|job| needle.as_deref().map_or(true, |n| job_mentions(job, n)))
            .collect();

        hits.sort_by(|a, b| compare_recency(a, b).then_with(|| a.job_id.cmp(&b.job_id)));
        hits.into_iter().take(limit).cloned().collect()
    }

    pub fn stats(&self, top_n: usize) -> CorpusStats {
        let mut by_platform = BTreeMap::new();
        let mut demand: HashMap<&str, usize> = HashMap::new();

        for job in &self.jobs {
            *by_platform.entry(job.platform.as_str()).or_insert(0) += 1;
            for skill in &job.skills {
                *demand.entry(skill.as_str()).or_insert(0) += 1;
            }
        }

        let mut top_skills: Vec<SkillDemand> = demand
            .into_iter()
            .map(|(skill, jobs)| SkillDemand {
                skill: skill.to_string(),
                jobs,
            })
            .collect();
        top_skills.sort_by(|a, b| b.jobs.cmp(&a.jobs).then_with(|| a.skill.cmp(&b.skill)));
        top_skills.truncate(top_n);

        CorpusStats {
            version: self.version,
            loaded_at: self.loaded_at,
            job_count: self.jobs.len(),
            rejected_records: self.rejected_records,
            remote_jobs: self.jobs.iter().filter(|j| j.is_remote()).count(),
            jobs_by_platform: by_platform,
            top_skills,
        }
    }
}

fn job_mentions(job: &Job, needle: &str) -> bool {
    job.title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
        || job.skills.iter().any(|s| s.to_lowercase().contains(needle))
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Owns the current snapshot and the source it is reloaded from.
pub struct CorpusStore {
    source: Arc<dyn JobSource>,
    lexicon: Arc<SkillLexicon>,
    current: RwLock<Arc<CorpusSnapshot>>,
}

impl CorpusStore {
    /// Loads the first snapshot (version 1).
    pub async fn load(source: Arc<dyn JobSource>, lexicon: Arc<SkillLexicon>) -> Result<Self, CorpusError> {
        let store = Self {
            source,
            lexicon,
            current: RwLock::new(Arc::new(CorpusSnapshot::empty())),
        };
        store.refresh().await?;
        Ok(store)
    }

    /// The snapshot to use for one whole request.
    pub async fn snapshot(&self) -> Arc<CorpusSnapshot> {
        self.current.read().await.clone()
    }

    /// Re-reads the source and swaps in a new snapshot. On error the current
    /// snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<CorpusSnapshot>, CorpusError> {
        let batch = self.source.fetch().await?;
        let jobs: Vec<Job> = batch
            .records
            .into_iter()
            .map(|record| record.into_job(&self.lexicon))
            .collect();

        let mut current = self.current.write().await;
        let snapshot = Arc::new(CorpusSnapshot {
            version: current.version + 1,
            loaded_at: Utc::now(),
            jobs,
            rejected_records: batch.rejected,
        });
        *current = snapshot.clone();

        info!(
            source = %self.source.describe(),
            version = snapshot.version,
            jobs = snapshot.len(),
            rejected = snapshot.rejected_records,
            "Corpus snapshot installed"
        );
        Ok(snapshot)
    }
}
