use anyhow::{bail, Result};
use log::{info, warn};

use crate::cli::CheckArgs;
use crate::commands::run::read_reference_list;
use crate::common::setup_logging;
use crate::profile::canonicalize;

/// Vet an input list offline: every reference must canonicalize before a
/// long scrape run is worth starting.
pub fn run_check(args: CheckArgs) -> Result<()> {
    setup_logging(&args.log_level)?;

    let references = read_reference_list(&args.input)?;

    let mut invalid = 0;
    for reference in &references {
        match canonicalize(reference) {
            Ok(canonical) => info!("ok: {} -> {}", reference, canonical),
            Err(e) => {
                warn!("{}", e);
                invalid += 1;
            }
        }
    }

    info!(
        "Checked {} references, {} invalid",
        references.len(),
        invalid
    );
    if invalid > 0 {
        bail!("{} of {} references are invalid", invalid, references.len());
    }
    Ok(())
}
