//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Annotate customer feedback with sentiment, category, and key themes.
#[derive(Debug, Parser)]
#[command(name = "remark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the text column in the input
    #[arg(long, default_value = "Comment")]
    pub column: String,

    /// Configuration file path (default: ./remark.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible completion service
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Abort the whole batch on the first error instead of isolating it
    #[arg(long)]
    pub fail_fast: bool,

    /// Reject sentiment values outside Positive/Neutral/Negative
    #[arg(long)]
    pub strict_sentiment: bool,

    /// Failure log file (append-only)
    #[arg(long, default_value = "api_errors.log")]
    pub error_log: PathBuf,
}
