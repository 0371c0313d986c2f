//! Command implementations for the `lingua` binary.
//!
//! Output goes to the supplied writer so commands can be driven from tests;
//! logs go to stderr.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use lingua_embeddings::{CandleEmbedder, EmbeddingModel, HashEmbedder, ModelCache};
use lingua_retrieval::{RagSession, RetrievalError};
use lingua_types::{Corpus, Settings};

use crate::render::format_results;

/// Line that ends an interactive session.
pub const QUIT_COMMAND: &str = ":q";

/// Load configuration (defaults -> file -> env) and apply CLI overrides.
pub fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Load the neural model, or the hashing stub when `stub` is set.
pub fn load_embedder(settings: &Settings, stub: bool) -> Result<Arc<dyn EmbeddingModel>> {
    if stub {
        info!("Using hashing stub embedder");
        return Ok(Arc::new(HashEmbedder::default()));
    }
    let embedder = CandleEmbedder::from_settings(settings)
        .with_context(|| format!("Failed to load embedding model {}", settings.model_repo))?;
    Ok(Arc::new(embedder))
}

/// Build a session over the built-in corpus.
pub fn start_session(embedder: Arc<dyn EmbeddingModel>) -> Result<RagSession> {
    let mut session = RagSession::new(embedder);
    session
        .initialize(&Corpus::builtin())
        .context("Failed to build search index")?;
    Ok(session)
}

/// Run one query and print the ranked results.
pub fn run_search<W: Write>(
    session: &RagSession,
    query: &str,
    top_k: usize,
    out: &mut W,
) -> Result<()> {
    let results = session.query(query, top_k).context("Search failed")?;
    out.write_all(format_results(&results).as_bytes())?;
    Ok(())
}

/// Answer questions read line by line until EOF or `:q`.
///
/// Blank lines are skipped. Per-query failures are reported and the loop
/// continues; I/O errors and a model that can no longer be loaded end it.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &RagSession,
    top_k: usize,
    input: R,
    out: &mut W,
) -> Result<()> {
    let stats = session.stats();
    writeln!(
        out,
        "Ready! Loaded {} documents in {} languages",
        stats.document_count,
        stats.language_count()
    )?;
    writeln!(
        out,
        "Ask your question (e.g. Tell me about traditional music), {} to quit",
        QUIT_COMMAND
    )?;

    for line in input.lines() {
        let line = line.context("Failed to read query")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == QUIT_COMMAND {
            break;
        }

        match session.query(query, top_k) {
            Ok(results) => out.write_all(format_results(&results).as_bytes())?,
            Err(RetrievalError::Embedding(e)) if e.is_model_load() => {
                return Err(e).context("Embedding model became unavailable");
            }
            Err(RetrievalError::Embedding(e)) => {
                warn!(error = %e, "Query failed");
                writeln!(out, "Could not encode query: {}", e)?;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}

/// List the built-in documents.
pub fn show_corpus<W: Write>(out: &mut W) -> Result<()> {
    let corpus = Corpus::builtin();
    for doc in corpus.documents() {
        writeln!(out, "{:>2} [{}] {}", doc.position, doc.language, doc.text)?;
    }
    writeln!(
        out,
        "{} documents in {} languages",
        corpus.len(),
        corpus.language_count()
    )?;
    Ok(())
}

/// Print details of the loaded embedder.
///
/// The stub has no model files, so no cache directory is shown for it.
pub fn show_model_info<W: Write>(
    settings: &Settings,
    embedder: &dyn EmbeddingModel,
    stub: bool,
    out: &mut W,
) -> Result<()> {
    let info = embedder.info();
    writeln!(out, "Model:               {}", info.name)?;
    writeln!(out, "Dimension:           {}", info.dimension)?;
    writeln!(out, "Max sequence length: {}", info.max_sequence_length)?;
    if !stub {
        writeln!(
            out,
            "Cache directory:     {}",
            ModelCache::from_settings(settings).model_dir().display()
        )?;
    }
    Ok(())
}
