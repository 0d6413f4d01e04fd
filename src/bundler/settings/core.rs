//! Core DistributionInfo struct and implementations.

use super::{LinuxSettings, MacOsSettings, ProductSettings, TargetArch, WindowsSettings};
use semver::Version;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// File name of the Windows installer splash screen inside `<resources>/logos`.
pub const SPLASH_SCREEN_FILE_NAME: &str = "win32-installer-splash.gif";

/// Resolved distribution metadata for one packaging run.
///
/// Immutable once built via [`DistributionInfoBuilder`](super::DistributionInfoBuilder).
/// Relative paths in the platform settings are resolved against
/// [`project_root`](Self::project_root) by the accessors, and unset values
/// fall back to the conventional project layout.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_package::bundler::{DistributionInfoBuilder, ProductSettings};
///
/// # fn example() -> kodegen_bundler_package::bundler::Result<()> {
/// let dist = DistributionInfoBuilder::new()
///     .project_root("/src/desktop")
///     .bundle_path("dist/GitHub Desktop-linux-x64")
///     .output_root("dist")
///     .product(ProductSettings {
///         product_name: "GitHub Desktop".into(),
///         company_name: "GitHub, Inc.".into(),
///         version: "3.4.1".parse().unwrap(),
///         icon_file_name: "icon-logo".into(),
///     })
///     .build()?;
/// assert_eq!(dist.appimage_glob(), "GitHubDesktop-linux-*.AppImage");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DistributionInfo {
    /// Product metadata.
    product: ProductSettings,

    /// Directory relative paths are resolved against.
    project_root: PathBuf,

    /// Pre-built application bundle.
    bundle_path: PathBuf,

    /// Directory installers, sidecars and reports are written to.
    output_root: PathBuf,

    /// Directory holding static resources (`logos/...`).
    resources_dir: Option<PathBuf>,

    /// Architecture installers are produced for.
    target_arch: TargetArch,

    /// Whether this build may be published (gates signing).
    publishable: bool,

    /// Node.js executable used for library-based builders.
    node: Option<PathBuf>,

    windows: WindowsSettings,
    linux: LinuxSettings,
    macos: MacOsSettings,

    /// Report key to file mapping for `bundle-size.json`.
    size_report: BTreeMap<String, PathBuf>,
}

impl DistributionInfo {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product.product_name
    }

    /// Returns the company name.
    pub fn company_name(&self) -> &str {
        &self.product.company_name
    }

    /// Returns the release version.
    pub fn version(&self) -> &Version {
        &self.product.version
    }

    /// Returns the icon base name.
    pub fn icon_file_name(&self) -> &str {
        &self.product.icon_file_name
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the pre-built bundle directory.
    pub fn bundle_path(&self) -> PathBuf {
        self.resolve(&self.bundle_path)
    }

    /// Returns the output root.
    pub fn output_root(&self) -> PathBuf {
        self.resolve(&self.output_root)
    }

    /// Returns the target architecture.
    pub fn target_arch(&self) -> TargetArch {
        self.target_arch
    }

    /// Returns true if the build is publishable.
    pub fn is_publishable(&self) -> bool {
        self.publishable
    }

    /// Resolves `path` against the project root. Absolute paths are returned as-is.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// Returns the static resources directory.
    pub fn resources_dir(&self) -> PathBuf {
        match &self.resources_dir {
            Some(dir) => self.resolve(dir),
            None => self.project_root.join("app").join("static"),
        }
    }

    /// Returns the Windows setup icon location.
    pub fn setup_icon_path(&self) -> PathBuf {
        self.resources_dir()
            .join("logos")
            .join(format!("{}.ico", self.icon_file_name()))
    }

    /// Returns the Windows setup splash screen location.
    pub fn splash_screen_path(&self) -> PathBuf {
        self.resources_dir()
            .join("logos")
            .join(SPLASH_SCREEN_FILE_NAME)
    }

    /// Returns the Node.js executable if one was configured.
    pub fn node_executable(&self) -> Option<PathBuf> {
        self.node.as_deref().map(|p| self.resolve(p))
    }

    // === Windows ===

    /// NuGet package identifier.
    pub fn windows_identifier(&self) -> String {
        self.windows
            .identifier
            .clone()
            .unwrap_or_else(|| self.product.compact_name())
    }

    /// Standalone setup executable file name.
    pub fn windows_standalone_name(&self) -> String {
        self.windows.standalone_name.clone().unwrap_or_else(|| {
            format!("{}Setup-{}.exe", self.windows_identifier(), self.target_arch)
        })
    }

    /// MSI installer file name.
    pub fn windows_installer_name(&self) -> String {
        self.windows.installer_name.clone().unwrap_or_else(|| {
            format!("{}Setup-{}.msi", self.windows_identifier(), self.target_arch)
        })
    }

    /// Prefix of the NuGet packages produced by the installer builder.
    pub fn windows_nuget_prefix(&self) -> String {
        format!("{}-{}", self.windows_identifier(), self.product.version)
    }

    /// Remote icon URL.
    pub fn windows_icon_url(&self) -> Option<&str> {
        self.windows.icon_url.as_deref()
    }

    /// Update feed URL.
    pub fn updates_url(&self) -> Option<&str> {
        self.windows.updates_url.as_deref()
    }

    /// True if delta update packages should be produced.
    pub fn should_make_delta(&self) -> bool {
        self.windows.delta
    }

    /// Authenticode certificate location.
    pub fn windows_certificate_path(&self) -> PathBuf {
        match &self.windows.certificate_path {
            Some(path) => self.resolve(path),
            None => self
                .project_root
                .join("script")
                .join("windows-certificate.pfx"),
        }
    }

    // === Linux ===

    /// AppImage builder executable.
    pub fn appimage_builder(&self) -> PathBuf {
        self.node_bin(self.linux.appimage_builder.as_deref(), "electron-builder")
    }

    /// Config file passed to the AppImage builder.
    pub fn appimage_config(&self) -> PathBuf {
        match &self.linux.appimage_config {
            Some(path) => self.resolve(path),
            None => self
                .project_root
                .join("script")
                .join("electron-builder-linux.yml"),
        }
    }

    /// File name glob of the produced AppImage.
    pub fn appimage_glob(&self) -> String {
        self.linux
            .appimage_glob
            .clone()
            .unwrap_or_else(|| format!("{}-linux-*.AppImage", self.product.compact_name()))
    }

    /// Debian builder executable.
    pub fn debian_builder(&self) -> PathBuf {
        self.node_bin(
            self.linux.debian_builder.as_deref(),
            "electron-installer-debian",
        )
    }

    /// Optional Debian builder config.
    pub fn debian_config(&self) -> Option<PathBuf> {
        self.linux.debian_config.as_deref().map(|p| self.resolve(p))
    }

    /// File name glob of the produced `.deb`.
    pub fn debian_glob(&self) -> String {
        self.linux
            .debian_glob
            .clone()
            .unwrap_or_else(|| "*.deb".to_string())
    }

    /// Redhat builder executable.
    pub fn redhat_builder(&self) -> PathBuf {
        self.node_bin(
            self.linux.redhat_builder.as_deref(),
            "electron-installer-redhat",
        )
    }

    /// Optional Redhat builder config.
    pub fn redhat_config(&self) -> Option<PathBuf> {
        self.linux.redhat_config.as_deref().map(|p| self.resolve(p))
    }

    /// File name glob of the produced `.rpm`.
    pub fn redhat_glob(&self) -> String {
        self.linux
            .redhat_glob
            .clone()
            .unwrap_or_else(|| "*.rpm".to_string())
    }

    // === macOS ===

    /// The signed `.app` bundle inside the bundle directory.
    pub fn macos_app_path(&self) -> PathBuf {
        self.bundle_path()
            .join(format!("{}.app", self.product_name()))
    }

    /// Destination of the zipped `.app`.
    pub fn macos_zip_path(&self) -> PathBuf {
        match &self.macos.zip_path {
            Some(path) => self.resolve(path),
            None => self
                .output_root()
                .join(format!("{}.zip", self.product_name())),
        }
    }

    // === Reports ===

    /// Report key to file mapping for `bundle-size.json`, resolved.
    pub fn size_report_entries(&self) -> impl Iterator<Item = (&str, PathBuf)> {
        self.size_report
            .iter()
            .map(|(key, path)| (key.as_str(), self.resolve(path)))
    }

    fn node_bin(&self, configured: Option<&Path>, name: &str) -> PathBuf {
        match configured {
            Some(path) => self.resolve(path),
            None => self
                .project_root
                .join("node_modules")
                .join(".bin")
                .join(name),
        }
    }

    /// Creates a new DistributionInfo (used by DistributionInfoBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        product: ProductSettings,
        project_root: PathBuf,
        bundle_path: PathBuf,
        output_root: PathBuf,
        resources_dir: Option<PathBuf>,
        target_arch: TargetArch,
        publishable: bool,
        node: Option<PathBuf>,
        windows: WindowsSettings,
        linux: LinuxSettings,
        macos: MacOsSettings,
        size_report: BTreeMap<String, PathBuf>,
    ) -> Self {
        Self {
            product,
            project_root,
            bundle_path,
            output_root,
            resources_dir,
            target_arch,
            publishable,
            node,
            windows,
            linux,
            macos,
            size_report,
        }
    }
}
