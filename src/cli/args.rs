//! Command line argument parsing.
//!
//! Every option that the build environment normally supplies can also be
//! given through its environment variable.

use crate::bundler::{
    DistributionInfo, HostOs, PackagingRequest, SigningCredentials, TargetArch,
};
use crate::metadata::DEFAULT_CONFIG_FILE;
use clap::{Parser, builder::FalseyValueParser};
use std::path::PathBuf;

/// Release packager for pre-built application bundles
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_package",
    version,
    about = "Release packager for pre-built application bundles",
    long_about = "Turns a pre-built application bundle into the installers for the host OS.

macOS: zipped .app
Windows: setup executable, MSI and NuGet packages
Linux: AppImage, .deb and .rpm, plus SHA-256 checksums

Usage:
  kodegen_bundler_package --config distribution.toml
  TARGET_ARCH=arm64 kodegen_bundler_package

Exit code 0 = every installer was produced."
)]
pub struct Args {
    /// Distribution configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Target architecture: x64, arm64 or arm (anything else means x64)
    #[arg(long, env = "TARGET_ARCH", value_name = "ARCH")]
    pub target_arch: Option<String>,

    /// Running in CI; publishable Windows builds are signed
    #[arg(long, env = "GITHUB_ACTIONS", value_parser = FalseyValueParser::new())]
    pub ci: bool,

    /// Passphrase of the Windows signing certificate
    #[arg(
        long,
        env = "WINDOWS_CERT_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub cert_password: Option<String>,

    /// Overrides the configured update feed URL
    #[arg(long, value_name = "URL")]
    pub updates_url: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Architecture selected for this run.
    pub fn target_arch(&self) -> TargetArch {
        TargetArch::from_selector(self.target_arch.as_deref())
    }

    /// Builds the request for `host_os`.
    ///
    /// The passphrase is paired with the configured certificate location.
    pub fn packaging_request(&self, host_os: HostOs, dist: &DistributionInfo) -> PackagingRequest {
        PackagingRequest {
            target_arch: self.target_arch(),
            host_os,
            ci: self.ci,
            signing: self
                .cert_password
                .clone()
                .map(|password| SigningCredentials {
                    certificate: dist.windows_certificate_path(),
                    password,
                }),
            updates_url: self.updates_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn explicit_arguments_are_parsed() {
        let args = Args::try_parse_from([
            "kodegen_bundler_package",
            "--config",
            "release/distribution.toml",
            "--target-arch",
            "arm64",
            "--updates-url",
            "https://staging.example.com/latest",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("release/distribution.toml"));
        assert_eq!(args.target_arch(), TargetArch::Arm64);
        assert_eq!(
            args.updates_url.as_deref(),
            Some("https://staging.example.com/latest")
        );
    }

    #[test]
    fn unknown_arch_selects_x64() {
        let args = Args::try_parse_from([
            "kodegen_bundler_package",
            "--target-arch",
            "riscv64",
        ])
        .unwrap();
        assert_eq!(args.target_arch(), TargetArch::X64);
    }
}
