//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{CandidateProfile, ProfileBuilder};
use crate::matching::ranker::SkillGap;
use crate::matching::scorer::MatchResult;
use crate::matching::{MatchError, SkippedJob};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: Option<u32>,
    pub desired_location: Option<String>,
    pub desired_role: Option<String>,
}

impl ProfileRequest {
    fn into_builder(self) -> ProfileBuilder {
        ProfileBuilder::new()
            .resume_text(self.resume_text)
            .explicit_skills(self.skills)
            .experience_years(self.experience_years)
            .desired_location(self.desired_location)
            .desired_role(self.desired_role)
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(flatten)]
    pub profile: ProfileRequest,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub analysis_id: Uuid,
    pub profile: CandidateProfile,
    pub results: Vec<MatchResult>,
    pub skills_gap: Vec<SkillGap>,
    pub skipped_jobs: Vec<SkippedJob>,
    pub corpus_version: u64,
    pub corpus_size: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profile
///
/// Builds the candidate profile only; useful for checking what was extracted.
pub async fn handle_build_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.engine.build_profile(request.into_builder())?;
    Ok(Json(ProfileResponse { profile }))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let response = run_match(&state, request.profile.into_builder(), request.limit).await?;
    Ok(Json(response))
}

/// POST /api/v1/match/upload
///
/// Multipart: `resume` (PDF or plain text file), optional `location`, `role`,
/// `experience_years` and `limit` text fields.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume: Option<String> = None;
    let mut request = ProfileRequest::default();
    let mut limit = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                if bytes.len() > state.config.resume_max_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Resume is {} bytes; the limit is {}",
                        bytes.len(),
                        state.config.resume_max_bytes
                    )));
                }
                let kind = ResumeKind::detect(file_name.as_deref(), content_type.as_deref(), &bytes);
                resume = Some(extract_resume_text(kind, bytes.to_vec()).await?);
            }
            "location" => request.desired_location = Some(text_field(field).await?),
            "role" => request.desired_role = Some(text_field(field).await?),
            "experience_years" => request.experience_years = Some(parse_field(&name, field).await?),
            "limit" => limit = Some(parse_field(&name, field).await?),
            _ => {}
        }
    }

    request.resume_text =
        resume.ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;

    let response = run_match(&state, request.into_builder(), limit).await?;
    Ok(Json(response))
}

/// Builds the profile and ranks it against one corpus snapshot on a blocking thread.
async fn run_match(
    state: &AppState,
    builder: ProfileBuilder,
    limit: Option<usize>,
) -> Result<MatchResponse, AppError> {
    let limit = limit.unwrap_or(state.config.max_recommendations);
    let engine = state.engine.clone();
    let snapshot = state.corpus.snapshot().await;
    let corpus_version = snapshot.version;
    let corpus_size = snapshot.len();

    let (profile, outcome) = tokio::task::spawn_blocking(move || {
        let profile = engine.build_profile(builder)?;
        let outcome = engine.rank(&profile, &snapshot.jobs, limit)?;
        Ok::<_, MatchError>((profile, outcome))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in ranking: {e}")))??;

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        skills = profile.skills.len(),
        results = outcome.results.len(),
        skipped = outcome.skipped.len(),
        corpus_version,
        "Match completed"
    );

    Ok(MatchResponse {
        analysis_id,
        profile,
        results: outcome.results,
        skills_gap: outcome.skills_gap,
        skipped_jobs: outcome.skipped,
        corpus_version,
        corpus_size,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Upload helpers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeKind {
    Pdf,
    Text,
}

impl ResumeKind {
    fn detect(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> Self {
        let pdf_name = file_name.map_or(false, |n| n.to_lowercase().ends_with(".pdf"));
        let pdf_type = content_type == Some("application/pdf");
        if pdf_name || pdf_type || bytes.starts_with(b"%PDF") {
            ResumeKind::Pdf
        } else {
            ResumeKind::Text
        }
    }
}

async fn extract_resume_text(kind: ResumeKind, bytes: Vec<u8>) -> Result<String, AppError> {
    match kind {
        ResumeKind::Text => String::from_utf8(bytes)
            .map_err(|_| AppError::Validation("Resume must be a PDF or UTF-8 text file".to_string())),
        ResumeKind::Pdf => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?
            .map_err(|e| AppError::Validation(format!("Could not read PDF resume: {e}"))),
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

async fn parse_field<T: std::str::FromStr>(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> Result<T, AppError> {
    let raw = text_field(field).await?;
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("'{name}' must be a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_router;
    use crate::state::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = build_router(test_state().await);
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_profile_endpoint_extracts_skills() {
        let (status, body) = post_json(
            "/api/v1/profile",
            json!({"resume_text": "6 years of experience with golang and k8s", "skills": ["js"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["skills"], json!(["Go", "JavaScript", "Kubernetes"]));
        assert_eq!(body["profile"]["experience_years"], 6);
    }

    #[tokio::test]
    async fn test_match_returns_ranked_results_and_gap() {
        let (status, body) = post_json(
            "/api/v1/match",
            json!({"resume_text": "5 years experience in Python, React, AWS", "limit": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["job"]["job_id"], "py-1");
        assert_eq!(results[0]["matched_skills"], json!(["Python"]));
        assert_eq!(results[0]["missing_skills"], json!(["Django"]));
        assert!(results[0]["score"].as_f64().unwrap() >= results[1]["score"].as_f64().unwrap());
        assert_eq!(body["corpus_version"], 1);
        assert_eq!(body["corpus_size"], 4);
        assert_eq!(body["skipped_jobs"][0]["job_id"], "broken");
        assert!(!body["skills_gap"].as_array().unwrap().is_empty());
        assert!(Uuid::parse_str(body["analysis_id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_match_with_empty_input_is_422() {
        let (status, body) = post_json("/api/v1/match", json!({"resume_text": "  "})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_match_with_zero_limit_is_empty() {
        let (status, body) =
            post_json("/api/v1/match", json!({"resume_text": "Python", "limit": 0})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], json!([]));
    }

    fn multipart_body(boundary: &str, resume: &str, location: Option<&str>) -> String {
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n{resume}\r\n"
        );
        if let Some(location) = location {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"location\"\r\n\r\n{location}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        body
    }

    #[tokio::test]
    async fn test_upload_plain_text_resume() {
        let boundary = "XBOUNDARYX";
        let app = build_router(test_state().await);
        let response = app
            .oneshot(
                Request::post("/api/v1/match/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(multipart_body(boundary, "Java and Spring, 4 years", Some("Bangalore"))))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["profile"]["desired_location"], "Bangalore");
        assert_eq!(body["results"][0]["job"]["job_id"], "java-1");
        assert_eq!(body["results"][0]["location_match"], true);
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_400() {
        let boundary = "B";
        let body = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"role\"\r\n\r\nDev\r\n--{boundary}--\r\n");
        let app = build_router(test_state().await);
        let response = app
            .oneshot(
                Request::post("/api/v1/match/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_resume_kind_detection() {
        assert_eq!(ResumeKind::detect(Some("CV.PDF"), None, b""), ResumeKind::Pdf);
        assert_eq!(ResumeKind::detect(None, Some("application/pdf"), b""), ResumeKind::Pdf);
        assert_eq!(ResumeKind::detect(None, None, b"%PDF-1.7"), ResumeKind::Pdf);
        assert_eq!(ResumeKind::detect(Some("cv.txt"), Some("text/plain"), b"hi"), ResumeKind::Text);
    }

    #[tokio::test]
    async fn test_non_utf8_text_resume_rejected() {
        let err = extract_resume_text(ResumeKind::Text, vec![0xff, 0xfe, 0x00])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
