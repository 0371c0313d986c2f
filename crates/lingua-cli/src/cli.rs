//! CLI argument parsing for the `lingua` binary.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

/// Cross-lingual search over Irish, French and Spanish snippets.
///
/// Ask in any language; the closest snippets are returned with a
/// similarity score.
#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/lingua-rag/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Use the deterministic hashing embedder instead of the neural model
    #[arg(long, global = true)]
    pub stub: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Front-end commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single query and print the ranked snippets
    Search {
        /// Question, in any language
        query: String,

        /// Number of results (default from config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Read questions from stdin, one per line (`:q` to quit)
    Interactive {
        /// Number of results per question (default from config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// List the built-in documents
    Corpus,

    /// Load the embedding model and print its details
    ModelInfo,
}
