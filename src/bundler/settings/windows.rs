//! Windows platform-specific settings.

use std::path::PathBuf;

/// Windows installer configuration.
///
/// # Configuration
///
/// ```toml
/// [windows]
/// identifier = "GitHubDesktop"
/// standalone = "GitHubDesktopSetup-x64.exe"
/// installer = "GitHubDesktopSetup-x64.msi"
/// icon_url = "https://desktop.githubusercontent.com/github-desktop/app-icon.ico"
/// updates_url = "https://central.github.com/api/deployments/desktop/desktop/latest"
/// delta = true
/// certificate = "script/windows-certificate.pfx"
/// ```
///
/// Unset fields fall back to defaults derived from the product name and
/// target architecture, see [`DistributionInfo`](super::DistributionInfo).
#[derive(Clone, Debug, Default)]
pub struct WindowsSettings {
    /// NuGet package identifier, also the executable base name.
    ///
    /// Default: product name without spaces
    pub identifier: Option<String>,

    /// File name of the standalone setup executable.
    ///
    /// Default: `<identifier>Setup-<arch>.exe`
    pub standalone_name: Option<String>,

    /// File name of the MSI installer.
    ///
    /// Default: `<identifier>Setup-<arch>.msi`
    pub installer_name: Option<String>,

    /// Remote icon URL recorded in the NuGet package.
    pub icon_url: Option<String>,

    /// Update feed the delta packages are computed against.
    ///
    /// Required when `delta` is enabled, unless the run supplies a feed.
    pub updates_url: Option<String>,

    /// Produce delta update packages in addition to full packages.
    ///
    /// Default: false
    pub delta: bool,

    /// Authenticode certificate (PKCS#12) used when signing.
    ///
    /// Default: `script/windows-certificate.pfx`
    pub certificate_path: Option<PathBuf>,
}
