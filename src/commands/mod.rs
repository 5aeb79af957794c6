pub mod execute;
pub mod preflight;


pub use execute::run_migration;
pub use preflight::{PreflightReport, run_preflight};

use crate::config::Config;
use crate::db::DatabaseProbe;
use crate::error::Result;
use crate::pipeline::CommandRunner;
use tracing::info;

/// Pre-flight checks, then the dump/restore pipeline. Stops at the first failure.
pub async fn cmd_migrate<P, R>(config: &Config, probe: &P, runner: &R) -> Result<()>
where
    P: DatabaseProbe,
    R: CommandRunner,
{
    info!("Running pre-checks...");
    run_preflight(&config.options, &config.preflight, probe).await?;
    info!("Pre-checks completed without issue");

    info!("Starting import process... (This could take a while)");
    run_migration(&config.options, &config.tools, runner).await?;
    info!("Import complete!");

    Ok(())
}
