//! lingua: cross-lingual search over a small multilingual corpus.
//!
//! # Usage
//!
//! ```bash
//! lingua search "Tell me about traditional music" [-k N]
//! lingua interactive [-k N]
//! lingua corpus
//! lingua model-info
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/lingua-rag/config.toml)
//! 3. Environment variables (LINGUA_*)
//! 4. CLI flags

use std::io;

use anyhow::Result;
use clap::Parser;

use lingua_cli::{
    init_logging, load_embedder, load_settings, run_interactive, run_search, show_corpus,
    show_model_info, start_session, Cli, Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Search { query, top_k } => {
            let embedder = load_embedder(&settings, cli.stub)?;
            let session = start_session(embedder)?;
            run_search(
                &session,
                &query,
                top_k.unwrap_or(settings.top_k),
                &mut stdout,
            )?;
        }
        Commands::Interactive { top_k } => {
            let embedder = load_embedder(&settings, cli.stub)?;
            let session = start_session(embedder)?;
            run_interactive(
                &session,
                top_k.unwrap_or(settings.top_k),
                io::stdin().lock(),
                &mut stdout,
            )?;
        }
        Commands::Corpus => {
            show_corpus(&mut stdout)?;
        }
        Commands::ModelInfo => {
            let embedder = load_embedder(&settings, cli.stub)?;
            show_model_info(&settings, embedder.as_ref(), cli.stub, &mut stdout)?;
        }
    }

    Ok(())
}
