use std::sync::Arc;

use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::matching::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Lexicon + validated scoring settings. Read-only for the process lifetime.
    pub engine: Arc<MatchEngine>,
    /// Current job snapshot; swapped wholesale on refresh.
    pub corpus: Arc<CorpusStore>,
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    use crate::corpus::record::JobRecord;
    use crate::corpus::source::StaticJobSource;
    use crate::lexicon::SkillLexicon;
    use crate::models::job::ExperienceRange;

    fn record(id: &str, title: &str, skills: &[&str], experience: &str, location: &str, posted: &str) -> JobRecord {
        JobRecord {
            job_id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            experience: Some(experience.to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_date: Some(posted.to_string()),
            platform: Some("naukri".to_string()),
            ..JobRecord::default()
        }
    }

    let records = vec![
        record("py-1", "Python Developer", &["Python", "Django"], "3-6 years", "Pune", "2024-03-10"),
        record("java-1", "Java Developer", &["Java", "Spring"], "3+ years", "Bangalore", "2024-03-01"),
        record(
            "data-1",
            "Data Scientist",
            &["Python", "ML", "Statistics", "SQL"],
            "2-5 years",
            "Remote",
            "2024-03-05",
        ),
        JobRecord {
            experience_range: Some(ExperienceRange::new(9, Some(2))),
            ..record("broken", "Python Developer", &["Python"], "", "Pune", "2024-03-11")
        },
    ];

    let config = Config::from_lookup(|_| None).unwrap();
    let lexicon = Arc::new(SkillLexicon::builtin().unwrap());
    let engine = MatchEngine::new(lexicon.clone(), config.engine).unwrap();
    let corpus = CorpusStore::load(Arc::new(StaticJobSource::new(records)), lexicon)
        .await
        .unwrap();

    AppState {
        config,
        engine: Arc::new(engine),
        corpus: Arc::new(corpus),
    }
}
