//! Linux packaging: AppImage, Debian and Redhat packages.
//!
//! The sub-packagers run strictly in sequence. The first failure stops the
//! chain; later formats are not attempted.

pub mod appimage;
pub mod debian;
pub mod redhat;
pub mod sandbox;

pub use appimage::AppImageBuilder;
pub use debian::DebianBuilder;
pub use redhat::RedhatBuilder;

use crate::bundler::{
    error::Result,
    platform::{ChecksumPolicy, InstallerArtifact, Packager},
    settings::{DistributionInfo, HostOs, PackagingRequest},
    utils::process::ToolInvocation,
};
use std::path::{Path, PathBuf};

/// One Linux package format.
#[allow(async_fn_in_trait)]
pub trait SubPackager {
    /// Format name for logs.
    fn name(&self) -> &'static str;

    /// Builds the package and returns the located artifact.
    async fn build(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<InstallerArtifact>;
}

impl<T: SubPackager + ?Sized> SubPackager for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn build(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<InstallerArtifact> {
        (**self).build(dist, request).await
    }
}

/// Invocation shared by the Debian and Redhat installer tools.
pub(crate) fn installer_invocation(
    tool: PathBuf,
    dist: &DistributionInfo,
    arch: &str,
    config: Option<&Path>,
) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(tool)
        .arg("--src")
        .arg(dist.bundle_path())
        .arg("--dest")
        .arg(dist.output_root())
        .args(["--arch", arch]);
    if let Some(config) = config {
        invocation = invocation.arg("--config").arg(config);
    }
    invocation.current_dir(dist.project_root())
}

/// Runs the AppImage, Debian and Redhat sub-packagers in order.
#[derive(Debug, Default)]
pub struct LinuxPackager<A = AppImageBuilder, D = DebianBuilder, R = RedhatBuilder> {
    appimage: A,
    debian: D,
    redhat: R,
}

impl<A: SubPackager, D: SubPackager, R: SubPackager> LinuxPackager<A, D, R> {
    /// Packager with explicit sub-packagers.
    pub fn new(appimage: A, debian: D, redhat: R) -> Self {
        Self {
            appimage,
            debian,
            redhat,
        }
    }
}

async fn build_one<S: SubPackager>(
    sub: &S,
    dist: &DistributionInfo,
    request: &PackagingRequest,
) -> Result<InstallerArtifact> {
    log::info!("Building {} package…", sub.name());
    let artifact = sub.build(dist, request).await?;
    log::info!("✓ Created {}: {}", artifact.kind(), artifact.path().display());
    Ok(artifact)
}

impl<A: SubPackager, D: SubPackager, R: SubPackager> Packager for LinuxPackager<A, D, R> {
    fn host(&self) -> HostOs {
        HostOs::Linux
    }

    fn checksum_policy(&self) -> ChecksumPolicy {
        ChecksumPolicy::Generate
    }

    /// Builds every Linux format.
    ///
    /// # Process
    ///
    /// 1. Set setuid permissions on the sandbox helper
    /// 2. AppImage
    /// 3. Debian
    /// 4. Redhat
    ///
    /// Artifacts are returned in that order.
    async fn package(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<Vec<InstallerArtifact>> {
        sandbox::prepare_sandbox_helper(&dist.bundle_path()).await?;

        log::info!("Packaging for Linux…");
        let artifacts = vec![
            build_one(&self.appimage, dist, request).await?,
            build_one(&self.debian, dist, request).await?,
            build_one(&self.redhat, dist, request).await?,
        ];

        log::info!("Installers created:");
        for artifact in &artifacts {
            log::info!("  - {}", artifact.path().display());
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        DistributionInfoBuilder, Error, LinuxSettings, ProductSettings, TargetArch,
        platform::ArtifactKind, utils::process::testing::RecordingRunner,
    };
    use std::sync::{Arc, Mutex};

    /// Writes a fixed file into the output root.
    struct FakeFormat {
        name: &'static str,
        file: &'static str,
        kind: ArtifactKind,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl SubPackager for FakeFormat {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn build(
            &self,
            dist: &DistributionInfo,
            _request: &PackagingRequest,
        ) -> Result<InstallerArtifact> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(Error::ToolFailed {
                    command: self.name.into(),
                    code: Some(1),
                    stderr: String::new(),
                });
            }
            let path = dist.output_root().join(self.file);
            std::fs::write(&path, self.file).unwrap();
            InstallerArtifact::confirm(path, self.kind).await
        }
    }

    fn formats(
        fail: Option<&'static str>,
    ) -> (
        LinuxPackager<FakeFormat, FakeFormat, FakeFormat>,
        Arc<Mutex<Vec<&'static str>>>,
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let format = |name: &'static str, file: &'static str, kind: ArtifactKind| FakeFormat {
            name,
            file,
            kind,
            fail: fail == Some(name),
            log: log.clone(),
        };
        let packager = LinuxPackager::new(
            format("AppImage", "App-linux-x64.AppImage", ArtifactKind::AppImage),
            format("Debian", "app_1.0_amd64.deb", ArtifactKind::Debian),
            format("Redhat", "app-1.0.x86_64.rpm", ArtifactKind::Redhat),
        );
        (packager, log)
    }

    fn dist_in(root: &Path, linux: LinuxSettings) -> DistributionInfo {
        std::fs::create_dir_all(root.join("dist/App-linux-x64")).unwrap();
        DistributionInfoBuilder::new()
            .project_root(root)
            .bundle_path("dist/App-linux-x64")
            .output_root("dist")
            .linux(linux)
            .product(ProductSettings {
                product_name: "App".into(),
                company_name: "Example".into(),
                version: semver::Version::new(1, 0, 0),
                icon_file_name: "icon".into(),
            })
            .build()
            .unwrap()
    }

    fn setup(linux: LinuxSettings) -> (tempfile::TempDir, DistributionInfo) {
        let dir = tempfile::tempdir().unwrap();
        let dist = dist_in(dir.path(), linux);
        (dir, dist)
    }

    fn request() -> PackagingRequest {
        PackagingRequest::new(HostOs::Linux, TargetArch::X64)
    }

    #[tokio::test]
    async fn formats_run_in_order() {
        let (_dir, dist) = setup(LinuxSettings::default());
        let (packager, log) = formats(None);

        let artifacts = packager.package(&dist, &request()).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["AppImage", "Debian", "Redhat"]);
        assert_eq!(
            artifacts.iter().map(|a| a.kind()).collect::<Vec<_>>(),
            vec![ArtifactKind::AppImage, ArtifactKind::Debian, ArtifactKind::Redhat]
        );
    }

    #[tokio::test]
    async fn debian_failure_stops_the_chain() {
        let (_dir, dist) = setup(LinuxSettings::default());
        let (packager, log) = formats(Some("Debian"));

        let err = packager.package(&dist, &request()).await.unwrap_err();

        assert!(matches!(err, Error::ToolFailed { .. }));
        assert_eq!(*log.lock().unwrap(), vec!["AppImage", "Debian"]);
    }

    /// Tool paths that exist so no `PATH` lookup happens.
    fn tool_settings(root: &Path) -> LinuxSettings {
        let bin = root.join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        for tool in [
            "electron-builder",
            "electron-installer-debian",
            "electron-installer-redhat",
        ] {
            std::fs::write(bin.join(tool), "").unwrap();
        }
        LinuxSettings::default()
    }

    /// Writes the file the real tool would have produced.
    fn write_tool_output(invocation: &ToolInvocation) -> Result<()> {
        let out = invocation.current_dir.clone().unwrap().join("dist");
        let file = match invocation.program_name().as_str() {
            "electron-builder" => "App-linux-x64.AppImage",
            "electron-installer-debian" => "app_1.0_amd64.deb",
            _ => "app-1.0.x86_64.rpm",
        };
        std::fs::write(out.join(file), "pkg").unwrap();
        Ok(())
    }

    fn fake_tools() -> RecordingRunner {
        RecordingRunner::with_hook(write_tool_output)
    }

    #[tokio::test]
    async fn real_builders_pass_arch_and_locate_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let dist = dist_in(dir.path(), tool_settings(dir.path()));

        let runner = fake_tools();
        let packager = LinuxPackager::new(
            AppImageBuilder::new(&runner),
            DebianBuilder::new(&runner),
            RedhatBuilder::new(&runner),
        );

        let artifacts = packager.package(&dist, &request()).await.unwrap();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(
            artifacts[0].path(),
            dir.path().join("dist/App-linux-x64.AppImage")
        );

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].to_string().contains("--prepackaged"));
        assert!(calls[0].to_string().contains("--x64"));
        assert!(calls[1].to_string().ends_with("--arch amd64"));
        assert!(calls[2].to_string().ends_with("--arch x86_64"));
    }

    #[tokio::test]
    async fn failing_debian_tool_skips_redhat_and_checksums() {
        let dir = tempfile::tempdir().unwrap();
        let dist = dist_in(dir.path(), tool_settings(dir.path()));

        let runner = RecordingRunner::with_hook(|invocation| {
            if invocation.program_name() == "electron-installer-debian" {
                return Err(Error::ToolFailed {
                    command: invocation.to_string(),
                    code: Some(1),
                    stderr: "dpkg-deb: error".into(),
                });
            }
            write_tool_output(invocation)
        });
        let packager = LinuxPackager::new(
            AppImageBuilder::new(&runner),
            DebianBuilder::new(&runner),
            RedhatBuilder::new(&runner),
        );
        let req = request();

        let result = crate::bundler::Orchestrator::new(&dist, &req)
            .run(&packager)
            .await;

        assert!(matches!(result, Err(Error::ToolFailed { code: Some(1), .. })));
        let programs: Vec<String> = runner.calls().iter().map(|c| c.program_name()).collect();
        assert_eq!(programs, vec!["electron-builder", "electron-installer-debian"]);

        let out = dir.path().join("dist");
        assert!(out.join("App-linux-x64.AppImage").exists());
        assert!(!out.join("checksums.txt").exists());
        let sidecars = std::fs::read_dir(&out)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "sha256")
            })
            .count();
        assert_eq!(sidecars, 0);
    }

    #[tokio::test]
    async fn two_appimages_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        let dist = dist_in(dir.path(), tool_settings(dir.path()));
        std::fs::write(dir.path().join("dist/App-linux-old.AppImage"), "old").unwrap();

        let runner = fake_tools();
        let err = LinuxPackager::new(
            AppImageBuilder::new(&runner),
            DebianBuilder::new(&runner),
            RedhatBuilder::new(&runner),
        )
        .package(&dist, &request())
        .await
        .unwrap_err();

        assert!(matches!(err, Error::AmbiguousArtifact { .. }));
        assert_eq!(runner.calls().len(), 1);
    }
}
