//! Skill Lexicon: canonical skill terms, their aliases and categories.
//!
//! Built once at startup (built-in table or a JSON file) and shared read-only
//! as `Arc<SkillLexicon>`. Reloading means constructing a new lexicon.

pub mod builtin;
pub mod normalizer;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexicon::normalizer::{normalize, normalize_phrase};

/// Longest alias phrase, in tokens, that the extractor will look for.
pub const MAX_PHRASE_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Tool,
    Platform,
    SoftSkill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTerm {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: SkillCategory,
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Skill term has an empty canonical name")]
    EmptyCanonical,

    #[error("Alias '{alias}' of '{canonical}' is longer than three words")]
    AliasTooLong { canonical: String, alias: String },

    #[error("Alias '{alias}' is claimed by both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lexicon file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable alias → canonical index.
#[derive(Debug, Clone)]
pub struct SkillLexicon {
    terms: Vec<SkillTerm>,
    /// normalized alias phrase → index into `terms`
    by_alias: HashMap<String, usize>,
    /// canonical name → index into `terms`
    by_canonical: HashMap<String, usize>,
    max_phrase_tokens: usize,
}

impl SkillLexicon {
    pub fn new(terms: Vec<SkillTerm>) -> Result<Self, LexiconError> {
        let mut by_alias: HashMap<String, usize> = HashMap::new();
        let mut by_canonical = HashMap::new();
        let mut max_phrase_tokens = 1;

        for (idx, term) in terms.iter().enumerate() {
            if term.canonical.trim().is_empty() {
                return Err(LexiconError::EmptyCanonical);
            }
            by_canonical.insert(term.canonical.clone(), idx);

            for alias in std::iter::once(&term.canonical).chain(term.aliases.iter()) {
                let tokens = normalize(alias);
                if tokens.is_empty() {
                    continue;
                }
                if tokens.len() > MAX_PHRASE_TOKENS {
                    return Err(LexiconError::AliasTooLong {
                        canonical: term.canonical.clone(),
                        alias: alias.clone(),
                    });
                }
                max_phrase_tokens = max_phrase_tokens.max(tokens.len());

                let key = tokens.join(" ");
                match by_alias.get(&key) {
                    Some(&existing) if existing != idx => {
                        return Err(LexiconError::AliasConflict {
                            alias: alias.clone(),
                            first: terms[existing].canonical.clone(),
                            second: term.canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(key, idx);
                    }
                }
            }
        }

        Ok(Self {
            terms,
            by_alias,
            by_canonical,
            max_phrase_tokens,
        })
    }

    /// The lexicon shipped with the service.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::new(builtin::builtin_terms())
    }

    /// Loads a JSON array of `{canonical, aliases, category}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        let terms: Vec<SkillTerm> = serde_json::from_str(&raw)?;
        Self::new(terms)
    }

    /// Exact lookup of an already-normalized phrase key ("machine learning").
    pub fn lookup_normalized(&self, key: &str) -> Option<&SkillTerm> {
        self.by_alias.get(key).map(|&idx| &self.terms[idx])
    }

    /// Resolves a raw skill string (any case, any alias) to its canonical name.
    pub fn canonicalize(&self, raw: &str) -> Option<&str> {
        self.lookup_normalized(&normalize_phrase(raw)).map(|t| t.canonical.as_str())
    }

    pub fn category_of(&self, canonical: &str) -> Option<SkillCategory> {
        self.by_canonical
            .get(canonical)
            .map(|&idx| self.terms[idx].category)
    }

    pub fn contains_canonical(&self, name: &str) -> bool {
        self.by_canonical.contains_key(name)
    }

    pub fn max_phrase_tokens(&self) -> usize {
        self.max_phrase_tokens
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn term(canonical: &str, aliases: &[&str], category: SkillCategory) -> SkillTerm {
        SkillTerm {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category,
        }
    }

    #[test]
    fn test_builtin_lexicon_builds() {
        let lexicon = SkillLexicon::builtin().unwrap();
        assert!(lexicon.len() > 50);
        assert!(lexicon.max_phrase_tokens() <= MAX_PHRASE_TOKENS);
    }

    #[test]
    fn test_canonicalize_resolves_aliases_case_insensitively() {
        let lexicon = SkillLexicon::builtin().unwrap();
        assert_eq!(lexicon.canonicalize("ML"), Some("Machine Learning"));
        assert_eq!(lexicon.canonicalize("machine LEARNING"), Some("Machine Learning"));
        assert_eq!(lexicon.canonicalize("k8s"), Some("Kubernetes"));
        assert_eq!(lexicon.canonicalize("ReactJS"), Some("React"));
        assert_eq!(lexicon.canonicalize("node.js"), Some("Node.js"));
        assert_eq!(lexicon.canonicalize("c++"), Some("C++"));
        assert_eq!(lexicon.canonicalize("C#"), Some("C#"));
    }

    #[test]
    fn test_canonicalize_unknown_returns_none() {
        let lexicon = SkillLexicon::builtin().unwrap();
        assert_eq!(lexicon.canonicalize("Underwater Basket Weaving"), None);
        assert_eq!(lexicon.canonicalize(""), None);
    }

    #[test]
    fn test_category_lookup() {
        let lexicon = SkillLexicon::builtin().unwrap();
        assert_eq!(lexicon.category_of("Python"), Some(SkillCategory::Language));
        assert_eq!(lexicon.category_of("AWS"), Some(SkillCategory::Platform));
        assert_eq!(lexicon.category_of("Agile"), Some(SkillCategory::SoftSkill));
        assert_eq!(lexicon.category_of("Kafka"), None);
    }

    #[test]
    fn test_alias_conflict_rejected() {
        let err = SkillLexicon::new(vec![
            term("Go", &["golang"], SkillCategory::Language),
            term("Golang Tools", &["GoLang"], SkillCategory::Tool),
        ])
        .unwrap_err();
        assert!(matches!(err, LexiconError::AliasConflict { .. }));
    }

    #[test]
    fn test_alias_longer_than_three_words_rejected() {
        let err = SkillLexicon::new(vec![term(
            "Kubernetes",
            &["container orchestration at scale"],
            SkillCategory::Tool,
        )])
        .unwrap_err();
        assert!(matches!(err, LexiconError::AliasTooLong { .. }));
    }

    #[test]
    fn test_empty_canonical_rejected() {
        let err = SkillLexicon::new(vec![term("  ", &[], SkillCategory::Tool)]).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyCanonical));
    }

    #[test]
    fn test_duplicate_alias_within_one_term_is_fine() {
        let lexicon =
            SkillLexicon::new(vec![term("Vue.js", &["vue js", "VUE.JS"], SkillCategory::Framework)])
                .unwrap();
        assert_eq!(lexicon.canonicalize("vue.js"), Some("Vue.js"));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"canonical": "Kafka", "aliases": ["apache kafka"], "category": "tool"}},
                {{"canonical": "Elixir", "category": "language"}}]"#
        )
        .unwrap();

        let lexicon = SkillLexicon::from_json_file(file.path()).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.canonicalize("Apache Kafka"), Some("Kafka"));
        assert_eq!(lexicon.category_of("Elixir"), Some(SkillCategory::Language));
    }
}
