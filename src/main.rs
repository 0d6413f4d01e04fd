//! Kodegen Bundler Package - release packager for pre-built application bundles.
//!
//! This binary turns a pre-built bundle into the host's installers
//! (.zip, Squirrel setup/MSI/NuGet, AppImage/.deb/.rpm) and writes checksums
//! and the bundle size report.

use kodegen_bundler_package::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            1
        }
    };

    process::exit(exit_code);
}
