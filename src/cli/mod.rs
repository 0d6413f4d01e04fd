//! Command line interface for the release packager.
//!
//! This module wires parsed arguments, the distribution configuration and
//! the host's packager into one orchestrated run.

mod args;

pub use args::Args;

use crate::bundler::{HostOs, Orchestrator, PlatformPackager, RunOutcome};
use crate::error::Result;
use crate::metadata::load_distribution;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs one packaging invocation and returns the process exit code.
///
/// Errors before packaging starts (unsupported host, unreadable
/// configuration) are returned; packaging failures are logged and mapped to
/// exit code 1.
pub async fn execute(args: &Args) -> Result<i32> {
    let host_os = HostOs::current()?;
    let dist = load_distribution(&args.config, args.target_arch())?;
    let request = args.packaging_request(host_os, &dist);

    let packager = PlatformPackager::select(host_os);
    let result = Orchestrator::new(&dist, &request).run(&packager).await;
    let outcome = RunOutcome::classify(&result);

    match result {
        Ok(summary) => {
            for artifact in &summary.artifacts {
                log::info!("{}: {}", artifact.kind(), artifact.path().display());
            }
            if !summary.checksums.is_empty() {
                log::info!("Checksums written for {} installer(s)", summary.checksums.len());
            }
        }
        Err(e) => {
            log::error!("Packaging failed ({:?}): {}", e.category(), e);
        }
    }

    Ok(outcome.exit_code())
}
