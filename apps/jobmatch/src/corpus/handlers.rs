//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::corpus::{CorpusStats, JobQuery, MAX_QUERY_LIMIT};
use crate::errors::AppError;
use crate::matching::similarity::SimilarJob;
use crate::models::job::Job;
use crate::state::AppState;

const DEFAULT_SIMILAR_LIMIT: usize = 5;
const TOP_SKILLS: usize = 20;

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub count: usize,
    pub corpus_version: u64,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub job_id: String,
    pub similar: Vec<SimilarJob>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub version: u64,
    pub job_count: usize,
    pub rejected_records: usize,
}

/// GET /api/v1/jobs?q=&platform=&location=&limit=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let snapshot = state.corpus.snapshot().await;
    let jobs = snapshot.query(&query);
    Ok(Json(JobListResponse {
        count: jobs.len(),
        jobs,
        corpus_version: snapshot.version,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let snapshot = state.corpus.snapshot().await;
    snapshot
        .get(&job_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// GET /api/v1/jobs/:id/similar?limit=
pub async fn handle_similar_jobs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> Result<Json<SimilarResponse>, AppError> {
    let snapshot = state.corpus.snapshot().await;
    let reference = snapshot
        .get(&job_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let limit = query.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT).min(MAX_QUERY_LIMIT);

    let engine = state.engine.clone();
    let similar = tokio::task::spawn_blocking(move || engine.similar(&reference, &snapshot.jobs, limit))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in similarity: {e}")))?;

    Ok(Json(SimilarResponse { job_id, similar }))
}

/// POST /api/v1/jobs/refresh
///
/// Reloads the corpus from its source. Requests already in flight finish on
/// the snapshot they started with.
pub async fn handle_refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state.corpus.refresh().await?;
    Ok(Json(RefreshResponse {
        version: snapshot.version,
        job_count: snapshot.len(),
        rejected_records: snapshot.rejected_records,
    }))
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<CorpusStats>, AppError> {
    Ok(Json(state.corpus.snapshot().await.stats(TOP_SKILLS)))
}
