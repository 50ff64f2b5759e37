//! Ranker & Gap Analyzer.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lexicon::{SkillCategory, SkillLexicon};
use crate::matching::error::{MatchError, SkippedJob};
use crate::matching::profile::CandidateProfile;
use crate::matching::scorer::{JobScorer, MatchResult};
use crate::matching::weights::EngineSettings;
use crate::models::job::Job;

/// A skill the candidate lacks, counted over the top-ranked results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    /// How many of the considered results list it as missing.
    pub frequency: usize,
    pub jobs_considered: usize,
    /// `None` for job tags the lexicon does not know.
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub results: Vec<MatchResult>,
    pub skills_gap: Vec<SkillGap>,
    pub skipped: Vec<SkippedJob>,
}

/// Scores every job, orders the results and derives the skills gap.
///
/// Jobs with an empty id, a duplicate id or an inverted experience range are
/// skipped and reported; everything else is scored.
pub fn rank(
    profile: &CandidateProfile,
    jobs: &[Job],
    lexicon: &SkillLexicon,
    settings: &EngineSettings,
    limit: usize,
) -> Result<RankingOutcome, MatchError> {
    let scorer = JobScorer::new(profile, lexicon, settings)?;

    let mut results = Vec::with_capacity(jobs.len());
    let mut skipped = Vec::new();
    let mut seen_ids = HashSet::new();

    for job in jobs {
        if let Some(reason) = rejection_reason(job, &mut seen_ids) {
            warn!(job_id = %job.job_id, reason = %reason, "Skipping malformed job");
            skipped.push(SkippedJob {
                job_id: job.job_id.clone(),
                reason,
            });
            continue;
        }

        let result = scorer.score(job);
        if result.score > settings.min_score {
            results.push(result);
        }
    }

    results.sort_by(compare_results);
    results.truncate(limit);

    let skills_gap = skills_gap(&results, lexicon, settings.gap_top_k, settings.gap_limit);

    debug!(
        corpus = jobs.len(),
        returned = results.len(),
        skipped = skipped.len(),
        "Ranking pass complete"
    );

    Ok(RankingOutcome {
        results,
        skills_gap,
        skipped,
    })
}

fn rejection_reason(job: &Job, seen_ids: &mut HashSet<String>) -> Option<String> {
    if job.job_id.trim().is_empty() {
        return Some("empty job_id".to_string());
    }
    if job.experience_range.is_malformed() {
        return Some(format!(
            "experience range min {} exceeds max {}",
            job.experience_range.min_years,
            job.experience_range.max_years.unwrap_or_default()
        ));
    }
    if !seen_ids.insert(job.job_id.clone()) {
        return Some("duplicate job_id".to_string());
    }
    None
}

/// Score descending, then newest posting first (undated last), then job_id ascending.
pub fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| compare_recency(&a.job, &b.job))
        .then_with(|| a.job.job_id.cmp(&b.job.job_id))
}

/// Newer first; a missing timestamp sorts after any real one.
pub(crate) fn compare_recency(a: &Job, b: &Job) -> Ordering {
    match (a.posted_at, b.posted_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Missing skills across the first `top_k` results, most frequent first.
/// Equal counts keep the order in which the skill first appeared.
pub fn skills_gap(
    results: &[MatchResult],
    lexicon: &SkillLexicon,
    top_k: usize,
    gap_limit: usize,
) -> Vec<SkillGap> {
    let considered = &results[..top_k.min(results.len())];

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for result in considered {
        for skill in &result.missing_skills {
            let count = counts.entry(skill.as_str()).or_insert(0);
            if *count == 0 {
                order.push(skill.as_str());
            }
            *count += 1;
        }
    }

    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(gap_limit)
        .map(|skill| SkillGap {
            skill: skill.to_string(),
            frequency: counts[skill],
            jobs_considered: considered.len(),
            category: lexicon.category_of(skill),
        })
        .collect()
}
