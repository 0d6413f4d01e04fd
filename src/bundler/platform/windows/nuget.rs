//! NuGet package renaming.
//!
//! The installer builder does not let callers name the NuGet packages, but
//! release tooling expects them to carry the architecture like the setup
//! executable and MSI do. They are renamed after the fact.

use crate::bundler::{
    error::Result,
    platform::{ArtifactKind, InstallerArtifact},
    settings::TargetArch,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// NuGet package flavour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NugetKind {
    /// Complete package
    Full,
    /// Difference against the previous release
    Delta,
}

impl NugetKind {
    /// Kinds produced for a build; delta only when enabled.
    pub fn produced(delta: bool) -> &'static [NugetKind] {
        if delta {
            &[NugetKind::Full, NugetKind::Delta]
        } else {
            &[NugetKind::Full]
        }
    }

    /// File name suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            NugetKind::Full => "full",
            NugetKind::Delta => "delta",
        }
    }

    fn artifact_kind(self) -> ArtifactKind {
        match self {
            NugetKind::Full => ArtifactKind::FullInstaller,
            NugetKind::Delta => ArtifactKind::DeltaInstaller,
        }
    }
}

/// Name chosen by the builder: `<prefix>-<kind>.nupkg`.
pub fn builder_package_path(output: &Path, prefix: &str, kind: NugetKind) -> PathBuf {
    output.join(format!("{}-{}.nupkg", prefix, kind.as_str()))
}

/// Architecture-qualified name: `<prefix>-<arch>-<kind>.nupkg`.
pub fn arch_package_path(
    output: &Path,
    prefix: &str,
    arch: TargetArch,
    kind: NugetKind,
) -> PathBuf {
    output.join(format!("{}-{}-{}.nupkg", prefix, arch, kind.as_str()))
}

/// Renames the produced NuGet packages to embed `arch`.
///
/// Only the full package is touched when `delta` is false.
///
/// # Errors
///
/// A missing source package is fatal.
pub async fn rename_nuget_packages(
    output: &Path,
    prefix: &str,
    arch: TargetArch,
    delta: bool,
) -> Result<Vec<InstallerArtifact>> {
    let mut artifacts = Vec::new();

    for &kind in NugetKind::produced(delta) {
        let from = builder_package_path(output, prefix, kind);
        let to = arch_package_path(output, prefix, arch, kind);

        log::info!("Renaming {} to {}", from.display(), to.display());
        fs::rename_file(&from, &to).await?;

        artifacts.push(InstallerArtifact::confirm(to, kind.artifact_kind()).await?);
    }

    Ok(artifacts)
}
