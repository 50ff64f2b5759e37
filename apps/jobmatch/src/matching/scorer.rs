//! Match Scorer: one candidate profile against one job.
//!
//! score = Σ(active component × renormalized weight), clamped to [0, 1]
//!   skill      = |profile ∩ job| / |job|        (1.0 when the job lists no skills)
//!   experience = 1.0 in range or unknown, else 1 − decay × years outside, floored at 0
//!   location   = 1.0 on substring match or remote, else 0.0 (only with a preference)
//!   role       = share of desired-role words in the title (only when weighted)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::normalizer::{normalize, normalize_phrase};
use crate::lexicon::SkillLexicon;
use crate::matching::error::MatchError;
use crate::matching::profile::CandidateProfile;
use crate::matching::weights::{ActiveWeights, EngineSettings};
use crate::models::job::{ExperienceRange, Job};

/// Per-dimension component values before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill: f64,
    pub experience: f64,
    /// `None` when the dimension did not take part in the score.
    pub location: Option<f64>,
    pub role: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: Job,
    /// 0.0 – 1.0
    pub score: f64,
    /// 0 – 100
    pub score_percent: u32,
    pub breakdown: ScoreBreakdown,
    /// In the job's skill order.
    pub matched_skills: Vec<String>,
    /// In the job's skill order.
    pub missing_skills: Vec<String>,
    pub experience_fit: bool,
    pub location_match: bool,
    pub rationale: String,
}

/// A profile bound to the weights that apply to it, reusable across a corpus.
pub struct JobScorer<'a> {
    profile: &'a CandidateProfile,
    lexicon: &'a SkillLexicon,
    weights: ActiveWeights,
    experience_decay: f64,
}

impl<'a> JobScorer<'a> {
    pub fn new(
        profile: &'a CandidateProfile,
        lexicon: &'a SkillLexicon,
        settings: &EngineSettings,
    ) -> Result<Self, MatchError> {
        let weights = settings.weights.active(
            profile.desired_location.is_some(),
            profile.desired_role.is_some(),
        )?;
        Ok(Self {
            profile,
            lexicon,
            weights,
            experience_decay: settings.experience_decay_per_year,
        })
    }

    pub fn score(&self, job: &Job) -> MatchResult {
        let job_skills = canonical_job_skills(job, self.lexicon);
        let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
            .into_iter()
            .partition(|skill| self.profile.has_skill(skill));

        let skill = skill_component(matched_skills.len(), matched_skills.len() + missing_skills.len());
        let experience = experience_component(
            self.profile.experience_years,
            &job.experience_range,
            self.experience_decay,
        );
        let location = self
            .weights
            .location
            .map(|_| location_component(self.profile.desired_location.as_deref(), job));
        let role = self
            .weights
            .role
            .map(|_| role_component(self.profile.desired_role.as_deref(), &job.title));

        let weighted = skill * self.weights.skill
            + experience * self.weights.experience
            + location.zip(self.weights.location).map_or(0.0, |(c, w)| c * w)
            + role.zip(self.weights.role).map_or(0.0, |(c, w)| c * w);
        let score = weighted.clamp(0.0, 1.0);

        let breakdown = ScoreBreakdown {
            skill,
            experience,
            location,
            role,
        };
        let experience_fit = experience >= 1.0;
        let location_match = location.map_or(false, |c| c >= 1.0);
        let rationale = build_rationale(self.profile, job, &matched_skills, &breakdown);

        MatchResult {
            job: job.clone(),
            score,
            score_percent: (score * 100.0).round() as u32,
            breakdown,
            matched_skills,
            missing_skills,
            experience_fit,
            location_match,
            rationale,
        }
    }
}

/// Scores a single pair. Fails only on an unusable weight configuration.
pub fn score_job(
    profile: &CandidateProfile,
    job: &Job,
    lexicon: &SkillLexicon,
    settings: &EngineSettings,
) -> Result<MatchResult, MatchError> {
    Ok(JobScorer::new(profile, lexicon, settings)?.score(job))
}

/// The job's skills resolved through the lexicon, deduplicated, original order.
/// Tags unknown to the lexicon are kept as written so they can still be missing.
pub fn canonical_job_skills(job: &Job, lexicon: &SkillLexicon) -> Vec<String> {
    let mut seen = HashSet::new();
    job.skills
        .iter()
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            lexicon
                .canonicalize(raw)
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string())
        })
        .filter(|skill| seen.insert(normalize_phrase(skill)))
        .collect()
}

pub fn skill_component(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 1.0;
    }
    matched as f64 / required as f64
}

pub fn experience_component(years: Option<u32>, range: &ExperienceRange, decay_per_year: f64) -> f64 {
    let Some(years) = years else {
        return 1.0;
    };
    if range.contains(years) {
        return 1.0;
    }
    let distance = if years < range.min_years {
        range.min_years - years
    } else {
        // contains() failed above the floor, so a ceiling exists
        years - range.max_years.unwrap_or(years)
    };
    (1.0 - decay_per_year * distance as f64).max(0.0)
}

pub fn location_component(desired: Option<&str>, job: &Job) -> f64 {
    let Some(desired) = desired else {
        return 1.0;
    };
    if job.is_remote() || job.location.to_lowercase().contains(&desired.to_lowercase()) {
        1.0
    } else {
        0.0
    }
}

pub fn role_component(desired: Option<&str>, title: &str) -> f64 {
    let role_tokens = desired.map(normalize).unwrap_or_default();
    if role_tokens.is_empty() {
        return 1.0;
    }
    let title_tokens = normalize(title);
    let padded_title = format!(" {} ", normalize_phrase(title));
    if padded_title.contains(&format!(" {} ", role_tokens.join(" "))) {
        return 1.0;
    }
    let title_set: HashSet<&String> = title_tokens.iter().collect();
    let hits = role_tokens.iter().filter(|t| title_set.contains(t)).count();
    hits as f64 / role_tokens.len() as f64
}

/// Human-readable reasons behind a match.
fn build_rationale(
    profile: &CandidateProfile,
    job: &Job,
    matched_skills: &[String],
    breakdown: &ScoreBreakdown,
) -> String {
    let mut reasons = Vec::new();

    if !matched_skills.is_empty() {
        let shown: Vec<&str> = matched_skills.iter().take(3).map(String::as_str).collect();
        let extra = matched_skills.len().saturating_sub(shown.len());
        if extra > 0 {
            reasons.push(format!("Skills match: {} and {extra} more", shown.join(", ")));
        } else {
            reasons.push(format!("Skills match: {}", shown.join(", ")));
        }
    }

    if profile.experience_years.is_some() && breakdown.experience >= 1.0 {
        reasons.push(format!(
            "Experience fits {}",
            job.experience_range.describe()
        ));
    }

    if breakdown.location.map_or(false, |c| c >= 1.0) {
        if job.is_remote() {
            reasons.push("Location: Remote".to_string());
        } else {
            reasons.push(format!("Location: {}", job.location));
        }
    }

    if breakdown.role.map_or(false, |c| c >= 1.0) {
        reasons.push("Title matches desired role".to_string());
    }

    if reasons.is_empty() {
        return "General fit based on job requirements".to_string();
    }
    reasons.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::ProfileBuilder;
    use crate::matching::weights::ScoringWeights;
    use crate::models::job::JobPlatform;

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin().unwrap()
    }

    fn make_job(id: &str, skills: &[&str], range: (u32, Option<u32>), location: &str) -> Job {
        Job {
            job_id: id.to_string(),
            title: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            experience_range: ExperienceRange::new(range.0, range.1),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            posted_at: None,
            platform: JobPlatform::Naukri,
            remote: None,
            url: None,
            salary: None,
            job_type: None,
        }
    }

    fn profile(skills: &[&str], years: Option<u32>, location: Option<&str>) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_years: years,
            desired_location: location.map(str::to_string),
            desired_role: None,
        }
    }

    #[test]
    fn test_scenario_python_django() {
        let lexicon = lexicon();
        let profile = ProfileBuilder::new()
            .resume_text("5 years experience in Python, React, AWS")
            .build(&lexicon)
            .unwrap();
        let job = make_job("j1", &["Python", "Django"], (3, Some(6)), "Pune");

        let result = score_job(&profile, &job, &lexicon, &EngineSettings::default()).unwrap();
        assert_eq!(result.matched_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["Django"]);
        assert!((result.breakdown.skill - 0.5).abs() < f64::EPSILON);
        assert!((result.breakdown.experience - 1.0).abs() < f64::EPSILON);
        assert!(result.experience_fit);
        // No location preference: 0.7/0.9 × 0.5 + 0.2/0.9 × 1.0
        let expected = (0.7 * 0.5 + 0.2) / 0.9;
        assert!((result.score - expected).abs() < 1e-9, "score was {}", result.score);
        assert_eq!(result.score_percent, 61);
    }

    #[test]
    fn test_empty_job_skills_give_full_skill_component() {
        let job = make_job("j1", &[], (0, None), "");
        for skills in [vec![], vec!["Rust"], vec!["Python", "Go"]] {
            let p = profile(&skills, None, None);
            let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
            assert_eq!(result.breakdown.skill, 1.0);
            assert!(result.missing_skills.is_empty());
        }
    }

    #[test]
    fn test_experience_inside_range_is_full_credit() {
        let range = ExperienceRange::new(2, Some(5));
        for years in 2..=5 {
            assert_eq!(experience_component(Some(years), &range, 0.2), 1.0);
        }
    }

    #[test]
    fn test_unknown_experience_is_neutral() {
        let range = ExperienceRange::new(10, Some(12));
        assert_eq!(experience_component(None, &range, 0.2), 1.0);
    }

    #[test]
    fn test_experience_decays_linearly_and_floors() {
        let range = ExperienceRange::new(5, Some(8));
        assert!((experience_component(Some(4), &range, 0.2) - 0.8).abs() < 1e-9);
        assert!((experience_component(Some(10), &range, 0.2) - 0.6).abs() < 1e-9);
        assert_eq!(experience_component(Some(0), &range, 0.25), 0.0);
        assert_eq!(experience_component(Some(30), &range, 0.2), 0.0);
    }

    #[test]
    fn test_unbounded_range_never_penalizes_seniority() {
        let range = ExperienceRange::new(3, None);
        assert_eq!(experience_component(Some(25), &range, 0.2), 1.0);
    }

    #[test]
    fn test_location_component_rules() {
        let mut job = make_job("j1", &[], (0, None), "Bangalore, Karnataka");
        assert_eq!(location_component(None, &job), 1.0);
        assert_eq!(location_component(Some("bangalore"), &job), 1.0);
        assert_eq!(location_component(Some("Mumbai"), &job), 0.0);
        job.remote = Some(true);
        assert_eq!(location_component(Some("Mumbai"), &job), 1.0);
    }

    #[test]
    fn test_location_preference_changes_weighting() {
        let job = make_job("j1", &["Rust"], (0, None), "Chennai");
        let p = profile(&["Rust"], None, Some("Delhi"));
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(result.breakdown.location, Some(0.0));
        assert!(!result.location_match);
        assert!((result.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_job_skill_aliases_resolve_and_dedupe() {
        let job = make_job("j1", &["JS", "javascript", "k8s", "Kafka"], (0, None), "");
        assert_eq!(
            canonical_job_skills(&job, &lexicon()),
            vec!["JavaScript", "Kubernetes", "Kafka"]
        );
    }

    #[test]
    fn test_unknown_job_tags_dedupe_ignoring_case() {
        let job = make_job("j1", &["Kafka", "kafka", " KAFKA ", "Python"], (0, None), "");
        assert_eq!(canonical_job_skills(&job, &lexicon()), vec!["Kafka", "Python"]);

        let p = profile(&["Python"], None, None);
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(result.missing_skills, vec!["Kafka"]);
        assert!((result.breakdown.skill - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_skills_keep_job_order() {
        let job = make_job("j1", &["Go", "Docker", "Python", "AWS"], (0, None), "");
        let p = profile(&["Python"], None, None);
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(result.missing_skills, vec!["Go", "Docker", "AWS"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let job = make_job("j1", &["Python", "SQL", "Statistics"], (2, Some(4)), "Mumbai");
        let p = profile(&["Python", "Statistics"], Some(7), Some("Pune"));
        let settings = EngineSettings::default();
        let a = score_job(&p, &job, &lexicon(), &settings).unwrap();
        let b = score_job(&p, &job, &lexicon(), &settings).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }

    #[test]
    fn test_score_is_clamped_into_unit_interval() {
        let job = make_job("j1", &["Python"], (0, None), "Remote");
        let p = profile(&["Python"], Some(1), Some("anywhere"));
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert!((0.0..=1.0).contains(&result.score));
    }

    #[test]
    fn test_unusable_weights_surface_configuration_error() {
        let settings = EngineSettings {
            weights: ScoringWeights {
                skill: 0.0,
                experience: 0.0,
                location: 1.0,
                role: 0.0,
            },
            ..EngineSettings::default()
        };
        let job = make_job("j1", &["Python"], (0, None), "");
        let err = score_job(&profile(&["Python"], None, None), &job, &lexicon(), &settings).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
    }

    #[test]
    fn test_role_component() {
        assert_eq!(role_component(Some("Data Scientist"), "Senior Data Scientist"), 1.0);
        assert_eq!(role_component(Some("backend engineer"), "Software Engineer"), 0.5);
        assert_eq!(role_component(Some("designer"), "Software Engineer"), 0.0);
        assert_eq!(role_component(None, "Anything"), 1.0);
    }

    #[test]
    fn test_role_weight_affects_score_only_when_configured() {
        let mut job = make_job("j1", &["Python"], (0, None), "");
        job.title = "Data Scientist".to_string();
        let mut p = profile(&["Python"], None, None);
        p.desired_role = Some("Frontend Developer".to_string());

        let default_result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(default_result.breakdown.role, None);
        assert!((default_result.score - 1.0).abs() < 1e-9);

        let settings = EngineSettings {
            weights: ScoringWeights {
                skill: 0.6,
                experience: 0.2,
                location: 0.1,
                role: 0.2,
            },
            ..EngineSettings::default()
        };
        let weighted = score_job(&p, &job, &lexicon(), &settings).unwrap();
        assert_eq!(weighted.breakdown.role, Some(0.0));
        assert!((weighted.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_rationale_lists_reasons() {
        let job = make_job("j1", &["Python", "React", "AWS", "SQL"], (3, Some(6)), "Remote");
        let mut job = job;
        job.remote = Some(true);
        let p = profile(&["Python", "React", "AWS", "SQL"], Some(4), Some("Pune"));
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(
            result.rationale,
            "Skills match: Python, React, AWS and 1 more; Experience fits 3-6 years; Location: Remote"
        );
    }

    #[test]
    fn test_rationale_falls_back_to_general_fit() {
        let job = make_job("j1", &["Scala"], (10, None), "Delhi");
        let p = profile(&["Python"], Some(1), Some("Pune"));
        let result = score_job(&p, &job, &lexicon(), &EngineSettings::default()).unwrap();
        assert_eq!(result.rationale, "General fit based on job requirements");
    }
}
