//! Debian sub-packager.

use super::{SubPackager, installer_invocation};
use crate::bundler::{
    builder::{locator, tool_detection::locate_tool},
    error::Result,
    platform::{ArtifactKind, InstallerArtifact},
    settings::{DistributionInfo, PackagingRequest},
    utils::process::{SystemToolRunner, ToolRunner},
};

/// Builds the `.deb` with `electron-installer-debian`.
#[derive(Debug, Default)]
pub struct DebianBuilder<R = SystemToolRunner> {
    runner: R,
}

impl<R: ToolRunner> DebianBuilder<R> {
    /// Builder running the tool through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: ToolRunner> SubPackager for DebianBuilder<R> {
    fn name(&self) -> &'static str {
        "Debian"
    }

    async fn build(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<InstallerArtifact> {
        let tool = locate_tool(&dist.debian_builder(), "electron-installer-debian")?;
        let invocation = installer_invocation(
            tool,
            dist,
            request.target_arch.debian_arch(),
            dist.debian_config().as_deref(),
        );

        self.runner.run(&invocation).await?;

        let path = locator::resolve_in(&dist.output_root(), &dist.debian_glob())?;
        InstallerArtifact::confirm(path, ArtifactKind::Debian).await
    }
}
