//! Job-to-job similarity for "more like this" lookups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::normalizer::normalize;
use crate::lexicon::SkillLexicon;
use crate::matching::ranker::compare_recency;
use crate::matching::scorer::canonical_job_skills;
use crate::models::job::Job;

const TITLE_EXACT: f64 = 0.3;
const TITLE_SHARED_WORD: f64 = 0.2;
const SKILLS: f64 = 0.3;
const EXPERIENCE_IDENTICAL: f64 = 0.2;
const EXPERIENCE_OVERLAP: f64 = 0.15;
const LOCATION: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarJob {
    pub job: Job,
    pub similarity: f64,
}

/// Similarity of two postings in [0, 1].
pub fn job_similarity(a: &Job, b: &Job, lexicon: &SkillLexicon) -> f64 {
    let mut score = 0.0;

    let title_a = normalize(&a.title);
    let title_b = normalize(&b.title);
    if !title_a.is_empty() && title_a == title_b {
        score += TITLE_EXACT;
    } else {
        let words_a: HashSet<&String> = title_a.iter().collect();
        if title_b.iter().any(|w| words_a.contains(w)) {
            score += TITLE_SHARED_WORD;
        }
    }

    let skills_a: HashSet<String> = canonical_job_skills(a, lexicon).into_iter().collect();
    let skills_b: HashSet<String> = canonical_job_skills(b, lexicon).into_iter().collect();
    let larger = skills_a.len().max(skills_b.len());
    if larger > 0 {
        let shared = skills_a.intersection(&skills_b).count();
        score += SKILLS * shared as f64 / larger as f64;
    }

    if a.experience_range == b.experience_range {
        score += EXPERIENCE_IDENTICAL;
    } else if a.experience_range.overlaps(&b.experience_range) {
        score += EXPERIENCE_OVERLAP;
    }

    let loc_a = a.location.trim();
    if !loc_a.is_empty() && loc_a.eq_ignore_ascii_case(b.location.trim()) {
        score += LOCATION;
    }

    f64::min(score, 1.0)
}

/// Corpus jobs most similar to `reference`, best first, the reference itself excluded.
pub fn similar_jobs(
    reference: &Job,
    corpus: &[Job],
    lexicon: &SkillLexicon,
    min_similarity: f64,
    limit: usize,
) -> Vec<SimilarJob> {
    let mut similar: Vec<SimilarJob> = corpus
        .iter()
        .filter(|job| job.job_id != reference.job_id)
        .map(|job| SimilarJob {
            similarity: job_similarity(reference, job, lexicon),
            job: job.clone(),
        })
        .filter(|s| s.similarity >= min_similarity)
        .collect();

    similar.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| compare_recency(&a.job, &b.job))
            .then_with(|| a.job.job_id.cmp(&b.job.job_id))
    });
    similar.truncate(limit);
    similar
}
