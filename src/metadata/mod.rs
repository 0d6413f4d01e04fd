//! Distribution metadata from `distribution.toml`.
//!
//! Relative paths in the file are resolved against the directory holding it,
//! which becomes the project root. `{arch}` in the bundle path is replaced
//! with the target architecture, so one file serves every architecture.
//!
//! ```toml
//! [product]
//! name = "GitHub Desktop"
//! company = "GitHub, Inc."
//! version = "3.4.1"
//! icon = "icon-logo"
//! publishable = true
//!
//! [paths]
//! bundle = "dist/GitHub Desktop-linux-{arch}"
//! output = "dist"
//!
//! [windows]
//! delta = true
//! updates_url = "https://central.github.com/api/deployments/desktop/desktop/latest"
//!
//! [size_report]
//! mainBundleSize = "out/main.js"
//! rendererBundleSize = "out/renderer.js"
//! ```

use crate::bundler::{
    DistributionInfo, DistributionInfoBuilder, LinuxSettings, MacOsSettings, ProductSettings,
    TargetArch, WindowsSettings,
};
use crate::error::{CliError, PackagerError, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "distribution.toml";

/// Placeholder replaced by the target architecture in the bundle path.
pub const ARCH_PLACEHOLDER: &str = "{arch}";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DistributionFile {
    product: ProductSection,
    paths: PathsSection,
    #[serde(default)]
    windows: WindowsSection,
    #[serde(default)]
    linux: LinuxSection,
    #[serde(default)]
    macos: MacOsSection,
    #[serde(default)]
    size_report: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductSection {
    name: String,
    company: String,
    version: String,
    icon: String,
    #[serde(default)]
    publishable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsSection {
    bundle: String,
    output: PathBuf,
    resources: Option<PathBuf>,
    node: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowsSection {
    identifier: Option<String>,
    standalone_name: Option<String>,
    installer_name: Option<String>,
    icon_url: Option<String>,
    updates_url: Option<String>,
    #[serde(default)]
    delta: bool,
    certificate: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinuxSection {
    appimage_builder: Option<PathBuf>,
    appimage_config: Option<PathBuf>,
    appimage_glob: Option<String>,
    debian_builder: Option<PathBuf>,
    debian_config: Option<PathBuf>,
    debian_glob: Option<String>,
    redhat_builder: Option<PathBuf>,
    redhat_config: Option<PathBuf>,
    redhat_glob: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MacOsSection {
    zip_path: Option<PathBuf>,
}

impl From<WindowsSection> for WindowsSettings {
    fn from(s: WindowsSection) -> Self {
        WindowsSettings {
            identifier: s.identifier,
            standalone_name: s.standalone_name,
            installer_name: s.installer_name,
            icon_url: s.icon_url,
            updates_url: s.updates_url,
            delta: s.delta,
            certificate_path: s.certificate,
        }
    }
}

impl From<LinuxSection> for LinuxSettings {
    fn from(s: LinuxSection) -> Self {
        LinuxSettings {
            appimage_builder: s.appimage_builder,
            appimage_config: s.appimage_config,
            appimage_glob: s.appimage_glob,
            debian_builder: s.debian_builder,
            debian_config: s.debian_config,
            debian_glob: s.debian_glob,
            redhat_builder: s.redhat_builder,
            redhat_config: s.redhat_config,
            redhat_glob: s.redhat_glob,
        }
    }
}

/// Loads distribution metadata for `target_arch` from `config_path`.
pub fn load_distribution(config_path: &Path, target_arch: TargetArch) -> Result<DistributionInfo> {
    let text = std::fs::read_to_string(config_path).map_err(|e| {
        PackagerError::Cli(CliError::ConfigUnreadable {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    let project_root = project_root_of(config_path)?;
    log::debug!("Project root: {}", project_root.display());

    parse_distribution(&text, &project_root, target_arch).map_err(|e| match e {
        PackagerError::Toml(e) => CliError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        }
        .into(),
        other => other,
    })
}

/// Parses `distribution.toml` contents with paths relative to `project_root`.
pub fn parse_distribution(
    text: &str,
    project_root: &Path,
    target_arch: TargetArch,
) -> Result<DistributionInfo> {
    let file: DistributionFile = toml::from_str(text)?;

    let version = semver::Version::parse(&file.product.version)?;
    let bundle = file
        .paths
        .bundle
        .replace(ARCH_PLACEHOLDER, target_arch.as_str());

    let mut builder = DistributionInfoBuilder::new()
        .project_root(project_root)
        .product(ProductSettings {
            product_name: file.product.name,
            company_name: file.product.company,
            version,
            icon_file_name: file.product.icon,
        })
        .publishable(file.product.publishable)
        .target_arch(target_arch)
        .bundle_path(bundle)
        .output_root(&file.paths.output)
        .windows(file.windows.into())
        .linux(file.linux.into())
        .macos(MacOsSettings {
            zip_path: file.macos.zip_path,
        });

    if let Some(resources) = &file.paths.resources {
        builder = builder.resources_dir(resources);
    }
    if let Some(node) = &file.paths.node {
        builder = builder.node(node);
    }
    for (key, path) in file.size_report {
        builder = builder.size_report_entry(key, path);
    }

    Ok(builder.build()?)
}

fn project_root_of(config_path: &Path) -> Result<PathBuf> {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(std::path::absolute(dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[product]
name = "GitHub Desktop"
company = "GitHub, Inc."
version = "3.4.1"
icon = "icon-logo"

[paths]
bundle = "dist/GitHub Desktop-linux-{arch}"
output = "dist"

[windows]
delta = true
updates_url = "https://central.github.com/api/deployments/desktop/desktop/latest"

[size_report]
mainBundleSize = "out/main.js"
"#;

    #[test]
    fn parses_sample_config() {
        let root = Path::new("/work/desktop");
        let dist = parse_distribution(SAMPLE, root, TargetArch::Arm64).unwrap();

        assert_eq!(dist.product_name(), "GitHub Desktop");
        assert_eq!(dist.version(), &semver::Version::new(3, 4, 1));
        assert_eq!(
            dist.bundle_path(),
            root.join("dist/GitHub Desktop-linux-arm64")
        );
        assert_eq!(dist.output_root(), root.join("dist"));
        assert!(dist.should_make_delta());
        assert!(!dist.is_publishable());
        assert_eq!(dist.appimage_glob(), "GitHubDesktop-linux-*.AppImage");
        assert_eq!(
            dist.size_report_entries().collect::<Vec<_>>(),
            vec![("mainBundleSize", root.join("out/main.js"))]
        );
    }

    #[test]
    fn invalid_version_is_rejected() {
        let text = SAMPLE.replace("3.4.1", "three");
        let err = parse_distribution(&text, Path::new("/w"), TargetArch::X64).unwrap_err();
        assert!(matches!(err, PackagerError::Version(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{SAMPLE}\n[extra]\nkey = 1\n");
        let err = parse_distribution(&text, Path::new("/w"), TargetArch::X64).unwrap_err();
        assert!(matches!(err, PackagerError::Toml(_)));
    }

    #[test]
    fn delta_without_feed_is_accepted() {
        let text = SAMPLE.replace(
            "updates_url = \"https://central.github.com/api/deployments/desktop/desktop/latest\"",
            "",
        );
        let dist = parse_distribution(&text, Path::new("/w"), TargetArch::X64).unwrap();
        assert!(dist.should_make_delta());
        assert_eq!(dist.updates_url(), None);
    }

    #[test]
    fn paths_are_relative_to_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config, SAMPLE).unwrap();

        let dist = load_distribution(&config, TargetArch::X64).unwrap();
        assert_eq!(dist.project_root(), dir.path());
        assert_eq!(
            dist.bundle_path(),
            dir.path().join("dist/GitHub Desktop-linux-x64")
        );
    }

    #[test]
    fn malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config, "[product]\nname = \"App\"\n").unwrap();

        let err = load_distribution(&config, TargetArch::X64).unwrap_err();
        match &err {
            PackagerError::Cli(CliError::InvalidConfig { path, .. }) => {
                assert_eq!(path, &config)
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
        assert!(err.is_configuration());
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn missing_config_is_a_cli_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_distribution(&dir.path().join("nope.toml"), TargetArch::X64).unwrap_err();
        assert!(matches!(
            err,
            PackagerError::Cli(CliError::ConfigUnreadable { .. })
        ));
    }
}
