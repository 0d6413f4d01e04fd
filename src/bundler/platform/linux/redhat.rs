//! Redhat sub-packager.

use super::{SubPackager, installer_invocation};
use crate::bundler::{
    builder::{locator, tool_detection::locate_tool},
    error::Result,
    platform::{ArtifactKind, InstallerArtifact},
    settings::{DistributionInfo, PackagingRequest},
    utils::process::{SystemToolRunner, ToolRunner},
};

/// Builds the `.rpm` with `electron-installer-redhat`.
#[derive(Debug, Default)]
pub struct RedhatBuilder<R = SystemToolRunner> {
    runner: R,
}

impl<R: ToolRunner> RedhatBuilder<R> {
    /// Builder running the tool through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: ToolRunner> SubPackager for RedhatBuilder<R> {
    fn name(&self) -> &'static str {
        "Redhat"
    }

    async fn build(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<InstallerArtifact> {
        let tool = locate_tool(&dist.redhat_builder(), "electron-installer-redhat")?;
        let invocation = installer_invocation(
            tool,
            dist,
            request.target_arch.redhat_arch(),
            dist.redhat_config().as_deref(),
        );

        self.runner.run(&invocation).await?;

        let path = locator::resolve_in(&dist.output_root(), &dist.redhat_glob())?;
        InstallerArtifact::confirm(path, ArtifactKind::Redhat).await
    }
}
