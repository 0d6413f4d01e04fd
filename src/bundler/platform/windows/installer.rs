//! Windows installer builder capability.

use super::options::WindowsInstallerOptions;
use crate::bundler::{
    builder::tool_detection::locate_tool,
    error::Result,
    settings::DistributionInfo,
    utils::process::{SystemToolRunner, ToolInvocation, ToolRunner},
};
use std::path::PathBuf;

/// Environment variable carrying the serialized options to the Node script.
pub const OPTIONS_ENV_VAR: &str = "KODEGEN_WINSTALLER_OPTIONS";

const CREATE_INSTALLER_SCRIPT: &str = "\
require('electron-winstaller')\
.createWindowsInstaller(JSON.parse(process.env.KODEGEN_WINSTALLER_OPTIONS))\
.catch(e => { console.error(e && e.stack ? e.stack : e); process.exit(1) })";

/// Produces the setup executable, MSI and NuGet packages.
///
/// Implementations must not return until the builder has finished writing
/// its output.
#[allow(async_fn_in_trait)]
pub trait InstallerBuilder {
    /// Builds installers described by `options`.
    async fn create_windows_installer(
        &self,
        dist: &DistributionInfo,
        options: &WindowsInstallerOptions,
    ) -> Result<()>;
}

impl<T: InstallerBuilder + ?Sized> InstallerBuilder for &T {
    async fn create_windows_installer(
        &self,
        dist: &DistributionInfo,
        options: &WindowsInstallerOptions,
    ) -> Result<()> {
        (**self).create_windows_installer(dist, options).await
    }
}

/// Runs the Squirrel installer builder through Node.js.
///
/// Options travel as JSON in [`OPTIONS_ENV_VAR`] so the signing passphrase
/// never appears on a command line.
#[derive(Debug, Default)]
pub struct NodeInstallerBuilder<R = SystemToolRunner> {
    runner: R,
}

impl<R: ToolRunner> NodeInstallerBuilder<R> {
    /// Builder running Node.js through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Invocation of `node` with the serialized options.
    pub fn invocation(
        node: PathBuf,
        dist: &DistributionInfo,
        options: &WindowsInstallerOptions,
    ) -> Result<ToolInvocation> {
        Ok(ToolInvocation::new(node)
            .args(["-e", CREATE_INSTALLER_SCRIPT])
            .env(OPTIONS_ENV_VAR, serde_json::to_string(options)?)
            .current_dir(dist.project_root()))
    }
}

impl<R: ToolRunner> InstallerBuilder for NodeInstallerBuilder<R> {
    async fn create_windows_installer(
        &self,
        dist: &DistributionInfo,
        options: &WindowsInstallerOptions,
    ) -> Result<()> {
        let configured = dist
            .node_executable()
            .unwrap_or_else(|| PathBuf::from("node"));
        let node = locate_tool(&configured, "node")?;

        self.runner
            .run(&Self::invocation(node, dist, options)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        DistributionInfoBuilder, ProductSettings, platform::windows::sign::SigningParams,
        utils::process::testing::RecordingRunner,
    };

    fn dist(root: &std::path::Path, node: &std::path::Path) -> DistributionInfo {
        DistributionInfoBuilder::new()
            .project_root(root)
            .bundle_path("dist/App-win32-x64")
            .output_root("dist/installer")
            .node(node)
            .product(ProductSettings {
                product_name: "App".into(),
                company_name: "Example".into(),
                version: semver::Version::new(1, 2, 0),
                icon_file_name: "icon".into(),
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn options_travel_through_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("node");
        std::fs::write(&node, "").unwrap();
        let dist = dist(dir.path(), &node);

        let mut options = WindowsInstallerOptions::new(&dist);
        options.sign_with_params = Some(SigningParams::new("cert.pfx".into(), "s3cret".into()));

        let runner = RecordingRunner::default();
        NodeInstallerBuilder::new(&runner)
            .create_windows_installer(&dist, &options)
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.program, node);
        assert_eq!(call.current_dir.as_deref(), Some(dir.path()));
        assert!(!call.to_string().contains("s3cret"));

        let json: serde_json::Value =
            serde_json::from_str(call.env_value(OPTIONS_ENV_VAR).unwrap()).unwrap();
        assert_eq!(json["name"], "App");
        assert_eq!(json["exe"], "App.exe");
        assert_eq!(json["setupExe"], "AppSetup-x64.exe");
        assert!(json["signWithParams"].as_str().unwrap().contains("/p s3cret"));
        assert!(json.get("remoteReleases").is_none());
    }
}
