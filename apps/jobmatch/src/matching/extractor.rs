//! Skill Extractor: greedy longest-match lexicon scan plus experience inference.
//!
//! Pure functions of (text, lexicon). No fuzzy matching: a phrase either equals
//! a normalized alias or it does not.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::normalizer::normalize_segments;
use crate::lexicon::SkillLexicon;

lazy_static! {
    /// "5 years", "5+ years", "5-8 years", "5 to 8 yrs", "3.5 years".
    static ref YEARS_RE: Regex = Regex::new(
        r"(?i)\b([0-9]{1,2})(?:\.[0-9]+)?\s*(?:\+|(?:-|–|to)\s*[0-9]{1,2}(?:\.[0-9]+)?\s*\+?)?\s*(?:years?|yrs?)\b"
    )
    .unwrap();
    static ref CONTEXT_RE: Regex = Regex::new(r"(?i)experience|years of").unwrap();
}

/// What the extractor found in one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillExtraction {
    /// Canonical names, deduplicated, in order of first mention.
    pub skills: Vec<String>,
    pub experience_years: Option<u32>,
}

/// Runs both extraction passes over raw text.
pub fn extract(text: &str, lexicon: &SkillLexicon) -> SkillExtraction {
    SkillExtraction {
        skills: extract_skills(&normalize_segments(text), lexicon),
        experience_years: infer_experience_years(text),
    }
}

/// Greedy left-to-right longest match over each segment.
///
/// At every position the longest n-gram (up to the lexicon's longest alias)
/// that resolves to a term wins and the scan resumes after it, so the words of
/// a matched phrase are never matched again on their own.
pub fn extract_skills(segments: &[Vec<String>], lexicon: &SkillLexicon) -> Vec<String> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let max_n = lexicon.max_phrase_tokens();

    for segment in segments {
        let mut i = 0;
        while i < segment.len() {
            let longest = max_n.min(segment.len() - i);
            let mut advanced = false;

            for n in (1..=longest).rev() {
                let key = segment[i..i + n].join(" ");
                if let Some(term) = lexicon.lookup_normalized(&key) {
                    if seen.insert(term.canonical.clone()) {
                        found.push(term.canonical.clone());
                    }
                    i += n;
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                i += 1;
            }
        }
    }

    found
}

struct YearsMention {
    lower_bound: u32,
    start: usize,
    end: usize,
}

/// Years of experience from "N years"-style mentions.
///
/// With one distinct value that value wins. With several, the mention closest
/// to "experience" / "years of" wins, earliest first on ties; without any
/// context keyword the first mention wins. Ages ("25 years old") are ignored.
pub fn infer_experience_years(text: &str) -> Option<u32> {
    let mentions: Vec<YearsMention> = YEARS_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let rest = text[whole.end()..].trim_start();
            if rest.to_lowercase().starts_with("old") {
                return None;
            }
            let lower_bound = caps.get(1)?.as_str().parse().ok()?;
            Some(YearsMention {
                lower_bound,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect();

    let first = mentions.first()?;
    let all_same = mentions.iter().all(|m| m.lower_bound == first.lower_bound);
    if all_same {
        return Some(first.lower_bound);
    }

    let keywords: Vec<(usize, usize)> = CONTEXT_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if keywords.is_empty() {
        return Some(first.lower_bound);
    }

    mentions
        .iter()
        .enumerate()
        .min_by_key(|(idx, m)| {
            let nearest = keywords
                .iter()
                .map(|&(ks, ke)| span_distance(m.start, m.end, ks, ke))
                .min()
                .unwrap_or(usize::MAX);
            (nearest, *idx)
        })
        .map(|(_, m)| m.lower_bound)
}

fn span_distance(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> usize {
    if b_start >= a_end {
        b_start - a_end
    } else if a_start >= b_end {
        a_start - b_end
    } else {
        0
    }
}
