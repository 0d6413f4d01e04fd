//! Test support utilities for packaging integration tests.
//!
//! Provides stand-in sub-packagers that write fixed installer files, and a
//! helper that lays out a throwaway project.

use kodegen_bundler_package::bundler::{
    ArtifactKind, DistributionInfo, DistributionInfoBuilder, Error, InstallerArtifact,
    PackagingRequest, ProductSettings, Result, platform::linux::SubPackager,
};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};

/// Names of the sub-packagers invoked so far, in order.
pub type InvocationLog = Arc<Mutex<Vec<&'static str>>>;

/// Sub-packager that writes `file_name` into the output root, or fails.
pub struct StubFormat {
    pub name: &'static str,
    pub file_name: &'static str,
    pub kind: ArtifactKind,
    pub fail: bool,
    pub log: InvocationLog,
}

impl SubPackager for StubFormat {
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
                command: format!("{} builder", self.name),
                code: Some(1),
                stderr: "packaging failed".into(),
            });
        }

        let path = dist.output_root().join(self.file_name);
        std::fs::write(&path, format!("{} installer contents", self.name)).unwrap();
        InstallerArtifact::confirm(path, self.kind).await
    }
}

/// AppImage, Debian and Redhat stand-ins producing the usual file names.
///
/// `failing` names the sub-packager that should fail, if any.
pub fn linux_formats(failing: Option<&str>) -> (StubFormat, StubFormat, StubFormat, InvocationLog) {
    let log: InvocationLog = Arc::default();
    let stub = |name: &'static str, file_name: &'static str, kind: ArtifactKind| StubFormat {
        name,
        file_name,
        kind,
        fail: failing == Some(name),
        log: log.clone(),
    };
    (
        stub("AppImage", "App-linux-x64.AppImage", ArtifactKind::AppImage),
        stub("Debian", "app_1.0_amd64.deb", ArtifactKind::Debian),
        stub("Redhat", "app-1.0.x86_64.rpm", ArtifactKind::Redhat),
        log,
    )
}

/// Distribution for a project rooted at `root` with a Linux bundle.
pub fn linux_distribution(root: &Path) -> DistributionInfo {
    std::fs::create_dir_all(root.join("dist/App-linux-x64")).unwrap();
    DistributionInfoBuilder::new()
        .project_root(root)
        .bundle_path("dist/App-linux-x64")
        .output_root("dist")
        .product(ProductSettings {
            product_name: "App".into(),
            company_name: "Example".into(),
            version: semver::Version::new(1, 0, 0),
            icon_file_name: "icon".into(),
        })
        .build()
        .unwrap()
}
