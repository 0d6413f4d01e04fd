//! AppImage sub-packager.
//!
//! The bundle is already built, so the AppImage builder runs in prepackaged
//! mode. It picks the output file name itself; the configured glob finds it.

use super::SubPackager;
use crate::bundler::{
    builder::{locator, tool_detection::locate_tool},
    error::Result,
    platform::{ArtifactKind, InstallerArtifact},
    settings::{DistributionInfo, PackagingRequest, TargetArch},
    utils::process::{SystemToolRunner, ToolInvocation, ToolRunner},
};
use std::path::{Path, PathBuf};

/// Builds the AppImage with `electron-builder`.
#[derive(Debug, Default)]
pub struct AppImageBuilder<R = SystemToolRunner> {
    runner: R,
}

impl<R: ToolRunner> AppImageBuilder<R> {
    /// Builder running the tool through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

/// `build --prepackaged <bundle> <arch flag> --config <config>`
pub fn appimage_invocation(
    tool: PathBuf,
    bundle: &Path,
    arch: TargetArch,
    config: &Path,
) -> ToolInvocation {
    ToolInvocation::new(tool)
        .args(["build", "--prepackaged"])
        .arg(bundle)
        .arg(arch.appimage_flag())
        .arg("--config")
        .arg(config)
}

impl<R: ToolRunner> SubPackager for AppImageBuilder<R> {
    fn name(&self) -> &'static str {
        "AppImage"
    }

    async fn build(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<InstallerArtifact> {
        let tool = locate_tool(&dist.appimage_builder(), "electron-builder")?;
        let invocation = appimage_invocation(
            tool,
            &dist.bundle_path(),
            request.target_arch,
            &dist.appimage_config(),
        )
        .current_dir(dist.project_root());

        self.runner.run(&invocation).await?;

        let path = locator::resolve_in(&dist.output_root(), &dist.appimage_glob())?;
        InstallerArtifact::confirm(path, ArtifactKind::AppImage).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_uses_prepackaged_mode() {
        let invocation = appimage_invocation(
            PathBuf::from("electron-builder"),
            Path::new("/work/dist/App-linux-arm64"),
            TargetArch::Arm64,
            Path::new("/work/script/electron-builder-linux.yml"),
        );
        assert_eq!(
            invocation.to_string(),
            "electron-builder build --prepackaged /work/dist/App-linux-arm64 --arm64 \
             --config /work/script/electron-builder-linux.yml"
        );
    }
}
