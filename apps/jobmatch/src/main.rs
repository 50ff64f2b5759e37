mod config;
mod corpus;
mod errors;
mod lexicon;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::source::JsonFileJobSource;
use crate::corpus::CorpusStore;
use crate::lexicon::SkillLexicon;
use crate::matching::MatchEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values or unusable weights)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    // Skill lexicon: optional JSON override, built-in otherwise
    let lexicon = match &config.lexicon_path {
        Some(path) => SkillLexicon::from_json_file(path)
            .with_context(|| format!("Failed to load skill lexicon from {}", path.display()))?,
        None => SkillLexicon::builtin().context("Built-in skill lexicon is invalid")?,
    };
    let lexicon = Arc::new(lexicon);
    info!(terms = lexicon.len(), "Skill lexicon loaded");

    let engine = MatchEngine::new(lexicon.clone(), config.engine)
        .context("Invalid matching configuration")?;
    info!(weights = ?config.engine.weights, "Match engine ready");

    // Initial corpus snapshot (missing file = empty corpus)
    let source = Arc::new(JsonFileJobSource::new(config.jobs_path.clone()));
    let corpus = CorpusStore::load(source, lexicon).await?;

    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
        corpus: Arc::new(corpus),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
