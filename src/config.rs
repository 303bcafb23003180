use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::constants::{
    DEFAULT_COLUMN, DEFAULT_LIMIT, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_VOCABULARY_FILE,
};

/// Prefix autocomplete over a vocabulary of drug names.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// CSV file holding the vocabulary. Falls back to a small sample list if missing.
    #[arg(short, long, default_value = DEFAULT_VOCABULARY_FILE)]
    pub vocabulary: PathBuf,

    /// Header of the column to read entries from.
    #[arg(short, long, default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Maximum number of suggestions shown.
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Sort the vocabulary case-insensitively before indexing.
    #[arg(long)]
    pub sorted: bool,

    /// Print the matches for this prefix and exit instead of starting the prompt.
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log level, overridden by `RUST_LOG`.
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}
