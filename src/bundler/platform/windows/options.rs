//! Installer-builder options.
//!
//! Field names serialize in camelCase to match the options object accepted by
//! the Squirrel-based installer builder library.

use super::sign::SigningParams;
use crate::bundler::{error::Result, settings::DistributionInfo};
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

/// Query flag that makes the update feed ignore staggered rollouts.
pub const BYPASS_STAGGERED_RELEASE: &str = "bypassStaggeredRelease";

/// Options handed to the installer builder.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsInstallerOptions {
    /// Internal NuGet package name.
    pub name: String,
    /// Pre-built application directory.
    pub app_directory: PathBuf,
    /// Where installers and packages are written.
    pub output_directory: PathBuf,
    /// Company recorded as package author.
    pub authors: String,
    /// Remote icon URL for the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Local icon of the setup executable.
    pub setup_icon: PathBuf,
    /// Splash screen shown while installing.
    pub loading_gif: PathBuf,
    /// Main executable name.
    pub exe: String,
    /// Product title.
    pub title: String,
    /// Desired setup executable file name.
    pub setup_exe: String,
    /// Desired MSI file name.
    pub setup_msi: String,
    /// Release feed delta packages are computed against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_releases: Option<String>,
    /// Code-signing parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_with_params: Option<SigningParams>,
}

impl WindowsInstallerOptions {
    /// Base options derived from distribution metadata, without a release
    /// feed or signing.
    pub fn new(dist: &DistributionInfo) -> Self {
        let identifier = dist.windows_identifier();
        Self {
            exe: format!("{identifier}.exe"),
            name: identifier,
            app_directory: dist.bundle_path(),
            output_directory: dist.output_root(),
            authors: dist.company_name().to_string(),
            icon_url: dist.windows_icon_url().map(str::to_string),
            setup_icon: dist.setup_icon_path(),
            loading_gif: dist.splash_screen_path(),
            title: dist.product_name().to_string(),
            setup_exe: dist.windows_standalone_name(),
            setup_msi: dist.windows_installer_name(),
            remote_releases: None,
            sign_with_params: None,
        }
    }
}

/// Forces `bypassStaggeredRelease=1` on the update feed URL.
///
/// Other query parameters are kept; any existing value of the flag is
/// replaced so delta packages are always computed against the newest release.
pub fn remote_releases_url(updates_url: &str) -> Result<String> {
    let mut url = Url::parse(updates_url)?;
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != BYPASS_STAGGERED_RELEASE)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(BYPASS_STAGGERED_RELEASE, "1");

    Ok(url.to_string())
}
