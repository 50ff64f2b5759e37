//! Candidate Profile Builder: turns resume text and/or structured search fields
//! into the `CandidateProfile` the scorer consumes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::SkillLexicon;
use crate::matching::error::MatchError;
use crate::matching::extractor::extract;

/// Per-request candidate description. Only canonical lexicon names in `skills`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: BTreeSet<String>,
    pub experience_years: Option<u32>,
    pub desired_location: Option<String>,
    pub desired_role: Option<String>,
}

impl CandidateProfile {
    pub fn has_skill(&self, canonical: &str) -> bool {
        self.skills.contains(canonical)
    }
}

/// Collects the inputs for one profile. Consumed by [`ProfileBuilder::build`].
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    resume_text: String,
    explicit_skills: Vec<String>,
    experience_years: Option<u32>,
    desired_location: Option<String>,
    desired_role: Option<String>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume_text(mut self, text: impl Into<String>) -> Self {
        self.resume_text = text.into();
        self
    }

    /// Skills supplied as structured filters. Added to, never replacing, the
    /// skills extracted from the resume text.
    pub fn explicit_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_skills
            .extend(skills.into_iter().map(Into::into));
        self
    }

    /// Stated experience; takes precedence over what the text implies.
    pub fn experience_years(mut self, years: Option<u32>) -> Self {
        self.experience_years = years;
        self
    }

    pub fn desired_location(mut self, location: Option<String>) -> Self {
        self.desired_location = location;
        self
    }

    pub fn desired_role(mut self, role: Option<String>) -> Self {
        self.desired_role = role;
        self
    }

    pub fn build(self, lexicon: &SkillLexicon) -> Result<CandidateProfile, MatchError> {
        let explicit: Vec<&str> = self
            .explicit_skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if self.resume_text.trim().is_empty() && explicit.is_empty() {
            return Err(MatchError::InvalidInput(
                "resume text is empty and no skills were supplied".to_string(),
            ));
        }

        let extraction = extract(&self.resume_text, lexicon);
        let mut skills: BTreeSet<String> = extraction.skills.into_iter().collect();

        for raw in explicit {
            match lexicon.canonicalize(raw) {
                Some(canonical) => {
                    skills.insert(canonical.to_string());
                }
                None => debug!(skill = raw, "Dropping explicit skill unknown to the lexicon"),
            }
        }

        Ok(CandidateProfile {
            skills,
            experience_years: self.experience_years.or(extraction.experience_years),
            desired_location: clean_optional(self.desired_location),
            desired_role: clean_optional(self.desired_role),
        })
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
