//! Packaging run orchestration.
//!
//! This module provides the [`Orchestrator`] that drives one packaging run:
//! the host's packager, checksum generation, and the bundle size report.

use super::{
    checksum::{ChecksumRecord, generate_checksums},
    size_report::write_bundle_size_report,
};
use crate::bundler::{
    error::{Error, Result},
    platform::{ChecksumPolicy, InstallerArtifact, Packager},
    settings::{DistributionInfo, PackagingRequest},
};
use std::path::PathBuf;

/// Everything a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Installers, in the order the packager produced them.
    pub artifacts: Vec<InstallerArtifact>,
    /// Checksums, empty when the packager skips them.
    pub checksums: Vec<ChecksumRecord>,
    /// Location of `bundle-size.json`.
    pub size_report: PathBuf,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// Every step succeeded.
    Success,
    /// Inputs were wrong; nothing was attempted.
    ConfigurationFailure,
    /// A tool, resolution or filesystem step failed.
    PackagingFailure,
}

impl RunOutcome {
    /// Classifies a run result.
    pub fn classify<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => RunOutcome::Success,
            Err(e) if e.is_configuration() => RunOutcome::ConfigurationFailure,
            Err(_) => RunOutcome::PackagingFailure,
        }
    }

    /// Process exit code: 0 on success, 1 on any failure.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::ConfigurationFailure | RunOutcome::PackagingFailure => 1,
        }
    }
}

/// Drives one packaging run.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_package::bundler::{
///     DistributionInfo, HostOs, Orchestrator, PackagingRequest, PlatformPackager,
/// };
///
/// # async fn example(dist: DistributionInfo) -> kodegen_bundler_package::bundler::Result<()> {
/// let request = PackagingRequest::new(HostOs::Linux, dist.target_arch());
/// let packager = PlatformPackager::select(request.host_os);
/// let summary = Orchestrator::new(&dist, &request).run(&packager).await?;
/// println!("{} installer(s)", summary.artifacts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Orchestrator<'a> {
    dist: &'a DistributionInfo,
    request: &'a PackagingRequest,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator for `dist` under `request`.
    pub fn new(dist: &'a DistributionInfo, request: &'a PackagingRequest) -> Self {
        Self { dist, request }
    }

    /// Runs `packager`, then checksums, then the size report.
    ///
    /// # Process
    ///
    /// 1. Package installers for the host
    /// 2. Generate checksums if the packager asks for them (awaited)
    /// 3. Write `bundle-size.json`
    ///
    /// The size report is also written after a failed packaging step, but
    /// not after a configuration error. A report failure only fails the run
    /// when packaging succeeded; otherwise the packaging error is returned.
    pub async fn run<P: Packager>(&self, packager: &P) -> Result<RunSummary> {
        log::info!(
            "Packaging {} {} for {} ({})",
            self.dist.product_name(),
            self.dist.version(),
            self.request.host_os.display_name(),
            self.request.target_arch
        );

        match self.package(packager).await {
            Ok((artifacts, checksums)) => {
                let size_report = write_bundle_size_report(self.dist).await?;
                log::info!("✓ Packaging complete");
                Ok(RunSummary {
                    artifacts,
                    checksums,
                    size_report,
                })
            }
            Err(e) if e.is_configuration() => Err(e),
            Err(e) => {
                if let Err(report_error) = write_bundle_size_report(self.dist).await {
                    log::warn!("Could not write bundle size report: {}", report_error);
                }
                Err(e)
            }
        }
    }

    async fn package<P: Packager>(
        &self,
        packager: &P,
    ) -> Result<(Vec<InstallerArtifact>, Vec<ChecksumRecord>)> {
        if packager.host() != self.request.host_os {
            return Err(Error::Configuration(format!(
                "{} packager cannot package for {}",
                packager.host().display_name(),
                self.request.host_os.display_name()
            )));
        }

        let artifacts = packager.package(self.dist, self.request).await?;

        let checksums = match packager.checksum_policy() {
            ChecksumPolicy::Generate => {
                generate_checksums(&self.dist.output_root(), &artifacts).await?
            }
            ChecksumPolicy::Skip => Vec::new(),
        };

        Ok((artifacts, checksums))
    }
}
