//! Windows packaging: Squirrel setup executable, MSI and NuGet packages.
//!
//! The installer builder writes `<id>Setup-<arch>.exe`, `<id>Setup-<arch>.msi`
//! and NuGet update packages into the output root. The NuGet packages are
//! renamed afterwards to carry the architecture.

pub mod installer;
pub mod nuget;
pub mod options;
pub mod sign;

pub use installer::{InstallerBuilder, NodeInstallerBuilder};
pub use options::WindowsInstallerOptions;
pub use sign::SigningParams;

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    platform::{InstallerArtifact, Packager},
    settings::{DistributionInfo, HostOs, PackagingRequest},
};
use std::path::Path;

/// Packages the pre-built application as Windows installers.
#[derive(Debug, Default)]
pub struct WindowsPackager<B = NodeInstallerBuilder> {
    builder: B,
}

impl<B: InstallerBuilder> WindowsPackager<B> {
    /// Packager delegating installer creation to `builder`.
    pub fn new(builder: B) -> Self {
        Self { builder }
    }
}

async fn require_resource(kind: &str, path: &Path) -> Result<()> {
    let present = tokio::fs::try_exists(path)
        .await
        .fs_context("checking installer resource", path)?;
    if present {
        Ok(())
    } else {
        Err(Error::MissingResource {
            kind: kind.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Assembles installer options for this run.
///
/// Delta packages need the update feed, with staggered rollouts bypassed.
/// The request's feed URL overrides the configured one.
pub fn installer_options(
    dist: &DistributionInfo,
    request: &PackagingRequest,
) -> Result<WindowsInstallerOptions> {
    let mut options = WindowsInstallerOptions::new(dist);

    if dist.should_make_delta() {
        let updates_url = request
            .updates_url
            .as_deref()
            .or(dist.updates_url())
            .ok_or_else(|| {
                Error::Configuration(
                    "an update feed URL is required when delta packages are enabled".into(),
                )
            })?;
        options.remote_releases = Some(options::remote_releases_url(updates_url)?);
    }

    options.sign_with_params = sign::signing_params(dist, request)?;
    Ok(options)
}

impl<B: InstallerBuilder> Packager for WindowsPackager<B> {
    fn host(&self) -> HostOs {
        HostOs::Windows
    }

    /// Builds Windows installers.
    ///
    /// # Process
    ///
    /// 1. Check the setup icon and splash screen exist
    /// 2. Assemble options (update feed, signing)
    /// 3. Run the installer builder to completion
    /// 4. Rename the NuGet packages to include the architecture
    async fn package(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<Vec<InstallerArtifact>> {
        require_resource("setup icon", &dist.setup_icon_path()).await?;
        require_resource("setup splash screen gif", &dist.splash_screen_path()).await?;

        let options = installer_options(dist, request)?;
        if options.sign_with_params.is_some() {
            log::info!("Installers will be signed");
        }

        log::info!("Packaging for Windows…");
        self.builder.create_windows_installer(dist, &options).await?;
        log::info!("Installers created in {}", dist.output_root().display());

        let artifacts = nuget::rename_nuget_packages(
            &dist.output_root(),
            &dist.windows_nuget_prefix(),
            request.target_arch,
            dist.should_make_delta(),
        )
        .await?;

        for artifact in &artifacts {
            log::info!("✓ Created {}: {}", artifact.kind(), artifact.path().display());
        }

        Ok(artifacts)
    }
}
