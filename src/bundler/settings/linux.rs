//! Linux platform-specific settings.

use std::path::PathBuf;

/// Linux packaging configuration.
///
/// Controls the three sub-packagers (AppImage, Debian, Redhat). Builder paths
/// are checked first; when a configured path does not exist the tool is
/// looked up in `PATH`.
///
/// # Configuration
///
/// ```toml
/// [linux]
/// appimage_builder = "node_modules/.bin/electron-builder"
/// appimage_config = "script/electron-builder-linux.yml"
/// appimage_glob = "GitHubDesktop-linux-*.AppImage"
/// debian_builder = "node_modules/.bin/electron-installer-debian"
/// redhat_builder = "node_modules/.bin/electron-installer-redhat"
/// ```
#[derive(Clone, Debug, Default)]
pub struct LinuxSettings {
    /// AppImage-family builder executable.
    ///
    /// Default: `node_modules/.bin/electron-builder`
    pub appimage_builder: Option<PathBuf>,

    /// Platform config file passed to the AppImage builder.
    ///
    /// Default: `script/electron-builder-linux.yml`
    pub appimage_config: Option<PathBuf>,

    /// File name glob of the produced AppImage, relative to the output root.
    ///
    /// Default: `<ProductNameWithoutSpaces>-linux-*.AppImage`
    pub appimage_glob: Option<String>,

    /// Debian package builder executable.
    ///
    /// Default: `node_modules/.bin/electron-installer-debian`
    pub debian_builder: Option<PathBuf>,

    /// Optional config file for the Debian builder.
    pub debian_config: Option<PathBuf>,

    /// File name glob of the produced `.deb`.
    ///
    /// Default: `*.deb`
    pub debian_glob: Option<String>,

    /// Redhat package builder executable.
    ///
    /// Default: `node_modules/.bin/electron-installer-redhat`
    pub redhat_builder: Option<PathBuf>,

    /// Optional config file for the Redhat builder.
    pub redhat_config: Option<PathBuf>,

    /// File name glob of the produced `.rpm`.
    ///
    /// Default: `*.rpm`
    pub redhat_glob: Option<String>,
}
