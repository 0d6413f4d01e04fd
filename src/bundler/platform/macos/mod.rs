//! macOS packaging: zip archive of the signed `.app` bundle.
//!
//! The `.app` is expected to be signed and notarized already. `ditto` is used
//! instead of a zip library so extended attributes and the notarization
//! ticket survive archiving.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    platform::{ArtifactKind, InstallerArtifact, Packager},
    settings::{DistributionInfo, HostOs, PackagingRequest},
    utils::{
        fs,
        process::{SystemToolRunner, ToolInvocation, ToolRunner},
    },
};
use std::path::Path;

/// Archiver used for the `.app` bundle.
pub const ARCHIVER: &str = "ditto";

/// Packages the `.app` bundle as a zip.
#[derive(Debug, Default)]
pub struct MacOsPackager<R = SystemToolRunner> {
    runner: R,
}

impl<R: ToolRunner> MacOsPackager<R> {
    /// Packager running the archiver through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

/// Builds the `ditto` invocation that zips `app` into `dest`, keeping the
/// `.app` directory as the archive's top-level entry.
pub fn archive_invocation(app: &Path, dest: &Path) -> ToolInvocation {
    ToolInvocation::new(ARCHIVER)
        .args(["-ck", "--keepParent"])
        .arg(app)
        .arg(dest)
}

impl<R: ToolRunner> Packager for MacOsPackager<R> {
    fn host(&self) -> HostOs {
        HostOs::MacOs
    }

    /// Zips the `.app` bundle.
    ///
    /// # Process
    ///
    /// 1. Check the `.app` bundle exists
    /// 2. Remove any previous archive at the destination
    /// 3. Run `ditto -ck --keepParent <app> <zip>`
    /// 4. Confirm the archive exists and is non-empty
    async fn package(
        &self,
        dist: &DistributionInfo,
        _request: &PackagingRequest,
    ) -> Result<Vec<InstallerArtifact>> {
        let app = dist.macos_app_path();
        let present = tokio::fs::try_exists(&app)
            .await
            .fs_context("checking application bundle", &app)?;
        if !present {
            return Err(Error::MissingResource {
                kind: "application bundle".into(),
                path: app,
            });
        }

        let dest = dist.macos_zip_path();
        fs::remove_if_exists(&dest).await?;

        log::info!("Packaging for macOS…");
        self.runner.run(&archive_invocation(&app, &dest)).await?;

        let archive = InstallerArtifact::confirm(dest, ArtifactKind::Archive).await?;
        log::info!("✓ Created archive: {}", archive.path().display());

        Ok(vec![archive])
    }
}
