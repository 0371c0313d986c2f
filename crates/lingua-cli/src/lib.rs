//! lingua front-end library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (search, interactive, corpus, model-info)
//! - `render`: Plain-text result rendering

pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Commands};
pub use commands::{
    init_logging, load_embedder, load_settings, run_interactive, run_search, show_corpus,
    show_model_info, start_session,
};
pub use render::format_results;
