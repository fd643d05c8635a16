use anyhow::Result;
use clap::Parser;

use scholar_profile_metrics::cli::{Cli, Commands};
use scholar_profile_metrics::commands::{run_check, run_scrape};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            run_scrape(args)?;
        }
        Commands::Check(args) => {
            run_check(args)?;
        }
    }

    Ok(())
}
