use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a posting was scraped from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPlatform {
    Naukri,
    Linkedin,
    #[default]
    Other,
}

impl JobPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPlatform::Naukri => "naukri",
            JobPlatform::Linkedin => "linkedin",
            JobPlatform::Other => "other",
        }
    }
}

/// Required experience in whole years. `max_years = None` means no upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min_years: u32,
    pub max_years: Option<u32>,
}

impl ExperienceRange {
    pub fn new(min_years: u32, max_years: Option<u32>) -> Self {
        Self {
            min_years,
            max_years,
        }
    }

    /// A range whose lower bound exceeds its upper bound.
    pub fn is_malformed(&self) -> bool {
        matches!(self.max_years, Some(max) if self.min_years > max)
    }

    pub fn contains(&self, years: u32) -> bool {
        years >= self.min_years && self.max_years.map_or(true, |max| years <= max)
    }

    pub fn overlaps(&self, other: &ExperienceRange) -> bool {
        let self_max = self.max_years.unwrap_or(u32::MAX);
        let other_max = other.max_years.unwrap_or(u32::MAX);
        self.min_years <= other_max && other.min_years <= self_max
    }

    /// "3-6 years", "5+ years", "2 years".
    pub fn describe(&self) -> String {
        match self.max_years {
            Some(max) if max == self.min_years => format!("{max} years"),
            Some(max) => format!("{}-{} years", self.min_years, max),
            None => format!("{}+ years", self.min_years),
        }
    }
}

/// A job posting as handed to the matching engine. Read-only snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience_range: ExperienceRange,
    /// Canonical skill names in the posting's original order.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub platform: JobPlatform,
    #[serde(default)]
    pub remote: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
}

impl Job {
    pub fn is_remote(&self) -> bool {
        self.remote.unwrap_or(false)
    }
}
