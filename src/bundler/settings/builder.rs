//! Builder for constructing DistributionInfo.

use super::{
    DistributionInfo, LinuxSettings, MacOsSettings, ProductSettings, TargetArch, WindowsSettings,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Builder for constructing [`DistributionInfo`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_package::bundler::{DistributionInfoBuilder, ProductSettings, TargetArch};
///
/// # fn example() -> kodegen_bundler_package::bundler::Result<()> {
/// let dist = DistributionInfoBuilder::new()
///     .project_root(".")
///     .bundle_path("dist/App-linux-x64")
///     .output_root("dist")
///     .target_arch(TargetArch::Arm64)
///     .product(ProductSettings {
///         product_name: "App".into(),
///         company_name: "Example".into(),
///         version: "1.0.0".parse().unwrap(),
///         icon_file_name: "icon".into(),
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DistributionInfoBuilder {
    product: Option<ProductSettings>,
    project_root: Option<PathBuf>,
    bundle_path: Option<PathBuf>,
    output_root: Option<PathBuf>,
    resources_dir: Option<PathBuf>,
    target_arch: TargetArch,
    publishable: bool,
    node: Option<PathBuf>,
    windows: WindowsSettings,
    linux: LinuxSettings,
    macos: MacOsSettings,
    size_report: BTreeMap<String, PathBuf>,
}

impl DistributionInfoBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets product metadata.
    ///
    /// # Required
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the directory relative paths are resolved against.
    ///
    /// Default: current working directory
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the pre-built bundle directory.
    ///
    /// # Required
    pub fn bundle_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output root.
    ///
    /// # Required
    pub fn output_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the static resources directory.
    ///
    /// Default: `app/static`
    pub fn resources_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resources_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target architecture.
    ///
    /// Default: [`TargetArch::X64`]
    pub fn target_arch(mut self, arch: TargetArch) -> Self {
        self.target_arch = arch;
        self
    }

    /// Marks the build as publishable.
    ///
    /// Default: false
    pub fn publishable(mut self, publishable: bool) -> Self {
        self.publishable = publishable;
        self
    }

    /// Sets the Node.js executable.
    ///
    /// Default: `node` from `PATH`
    pub fn node<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.node = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets Windows settings.
    pub fn windows(mut self, settings: WindowsSettings) -> Self {
        self.windows = settings;
        self
    }

    /// Sets Linux settings.
    pub fn linux(mut self, settings: LinuxSettings) -> Self {
        self.linux = settings;
        self
    }

    /// Sets macOS settings.
    pub fn macos(mut self, settings: MacOsSettings) -> Self {
        self.macos = settings;
        self
    }

    /// Adds a `bundle-size.json` entry.
    pub fn size_report_entry<P: AsRef<Path>>(mut self, key: impl Into<String>, path: P) -> Self {
        self.size_report
            .insert(key.into(), path.as_ref().to_path_buf());
        self
    }

    /// Builds the distribution info.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `product`, `bundle_path` or
    /// `output_root` is missing.
    pub fn build(self) -> crate::bundler::Result<DistributionInfo> {
        use crate::bundler::Error;

        let missing = |field: &str| Error::Configuration(format!("{field} is required"));

        let project_root = match self.project_root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        Ok(DistributionInfo::new(
            self.product.ok_or_else(|| missing("product"))?,
            project_root,
            self.bundle_path.ok_or_else(|| missing("bundle_path"))?,
            self.output_root.ok_or_else(|| missing("output_root"))?,
            self.resources_dir,
            self.target_arch,
            self.publishable,
            self.node,
            self.windows,
            self.linux,
            self.macos,
            self.size_report,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_are_configuration_errors() {
        let err = DistributionInfoBuilder::new()
            .project_root("/tmp")
            .bundle_path("dist/app")
            .output_root("dist")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("product is required"));
    }

    #[test]
    fn delta_without_configured_feed_builds() {
        let dist = DistributionInfoBuilder::new()
            .project_root("/tmp")
            .bundle_path("dist/app")
            .output_root("dist")
            .product(ProductSettings {
                product_name: "App".into(),
                company_name: "Example".into(),
                version: semver::Version::new(1, 0, 0),
                icon_file_name: "icon".into(),
            })
            .windows(WindowsSettings {
                delta: true,
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(dist.should_make_delta());
        assert_eq!(dist.updates_url(), None);
    }
}
