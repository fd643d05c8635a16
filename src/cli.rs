use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scholar-profile-metrics")]
#[command(about = "Extract and classify publication records from Google Scholar profiles")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape every profile in the input list and write the metric tables
    Run(RunArgs),

    /// Validate that every profile URL in the input list canonicalizes (no network)
    Check(CheckArgs),
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// File containing one profile URL per line
    #[arg(short, long, required = true)]
    pub input: String,

    /// Academic-year start; 2023 means the May 2023 - April 2024 window
    #[arg(short, long, required = true)]
    pub year: i32,

    /// Output CSV file with one row per profile
    #[arg(short, long, default_value = "profiles.csv")]
    pub output: String,

    /// Output CSV file with cross-profile totals and averages
    #[arg(short, long, default_value = "summary.csv")]
    pub summary: String,

    /// Optional JSONL file collecting manual-inspection diagnostics
    #[arg(long)]
    pub diagnostics: Option<String>,

    /// Minimum delay between consecutive requests, in seconds
    #[arg(long, default_value = "2")]
    pub delay_min: u64,

    /// Maximum delay between consecutive requests, in seconds
    #[arg(long, default_value = "5")]
    pub delay_max: u64,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    /// File containing one profile URL per line
    #[arg(short, long, required = true)]
    pub input: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
