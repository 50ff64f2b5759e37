//! Wire format of the scrapers' JSON dump and its conversion into engine `Job`s.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::normalizer::normalize_phrase;
use crate::lexicon::SkillLexicon;
use crate::models::job::{ExperienceRange, Job, JobPlatform};

lazy_static! {
    static ref RANGE_RE: Regex =
        Regex::new(r"([0-9]{1,2})\s*(?:-|–|to)\s*([0-9]{1,2})").unwrap();
    static ref PLUS_RE: Regex = Regex::new(r"([0-9]{1,2})\s*\+").unwrap();
    static ref SINGLE_RE: Regex = Regex::new(r"([0-9]{1,2})\s*(?:years?|yrs?)").unwrap();
}

/// Level words and the range each implies, checked in order.
const LEVEL_RANGES: &[(&[&str], u32, Option<u32>)] = &[
    (&["architect", "director"], 12, None),
    (&["lead", "principal", "staff"], 8, None),
    (&["senior"], 5, Some(10)),
    (&["mid", "intermediate"], 2, Some(5)),
    (&["entry", "junior", "fresher", "graduate"], 0, Some(2)),
];

/// One posting as written by a scraper. Loose on purpose: every field except
/// the id and title may be missing or in one of several shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Free text such as "5-8 years", "3+ years" or "Senior".
    #[serde(default)]
    pub experience: Option<String>,
    /// Structured range; wins over `experience` when both are present.
    #[serde(default)]
    pub experience_range: Option<ExperienceRange>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "posted_at")]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default, alias = "remote")]
    pub remote_work: Option<bool>,
}

impl JobRecord {
    /// Normalizes the record against the lexicon. Never fails: fields that do
    /// not parse fall back to their neutral value. A malformed experience range
    /// is passed through for the ranker to reject.
    pub fn into_job(self, lexicon: &SkillLexicon) -> Job {
        let experience_range = self
            .experience_range
            .unwrap_or_else(|| parse_experience_text(self.experience.as_deref().unwrap_or("")));

        let remote = self
            .remote_work
            .or_else(|| self.location.to_lowercase().contains("remote").then_some(true));

        Job {
            skills: canonicalize_skills(&self.skills, lexicon),
            posted_at: self.posted_date.as_deref().and_then(parse_timestamp),
            platform: parse_platform(self.platform.as_deref()),
            job_id: self.job_id.trim().to_string(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            experience_range,
            description: self.description,
            remote,
            url: self.url,
            salary: self.salary,
            job_type: self.job_type,
        }
    }
}

/// "5-8 years" → 5..8, "3+ years" → 3.., "2 years" → 2..4, level words per
/// `LEVEL_RANGES`, anything else → 0.. (no requirement).
pub fn parse_experience_text(text: &str) -> ExperienceRange {
    let lower = text.to_lowercase();

    if let Some(caps) = RANGE_RE.captures(&lower) {
        if let (Ok(lo), Ok(hi)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            return ExperienceRange::new(lo, Some(hi));
        }
    }
    if let Some(n) = PLUS_RE.captures(&lower).and_then(|c| c[1].parse::<u32>().ok()) {
        return ExperienceRange::new(n, None);
    }
    if let Some(n) = SINGLE_RE.captures(&lower).and_then(|c| c[1].parse::<u32>().ok()) {
        return ExperienceRange::new(n, Some(n + 2));
    }

    for (words, min, max) in LEVEL_RANGES {
        if words.iter().any(|w| lower.contains(w)) {
            return ExperienceRange::new(*min, *max);
        }
    }

    ExperienceRange::default()
}

fn canonicalize_skills(raw: &[String], lexicon: &SkillLexicon) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| lexicon.canonicalize(s).unwrap_or(s).to_string())
        .filter(|s| seen.insert(normalize_phrase(s)))
        .collect()
}

fn parse_platform(raw: Option<&str>) -> JobPlatform {
    match raw.map(|p| p.trim().to_lowercase()).as_deref() {
        Some("naukri") => JobPlatform::Naukri,
        Some("linkedin") => JobPlatform::Linkedin,
        _ => JobPlatform::Other,
    }
}

/// RFC 3339, or a naive timestamp / date taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    debug!(value = raw, "Unparseable posting date");
    None
}
