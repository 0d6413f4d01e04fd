//! Product metadata shared by every platform.

use semver::Version;

/// Product metadata.
///
/// Read once per run from the `[product]` section of `distribution.toml`.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_package::bundler::ProductSettings;
///
/// let product = ProductSettings {
///     product_name: "GitHub Desktop".into(),
///     company_name: "GitHub, Inc.".into(),
///     version: "3.4.1".parse().unwrap(),
///     icon_file_name: "icon-logo".into(),
/// };
/// assert_eq!(product.compact_name(), "GitHubDesktop");
/// ```
#[derive(Debug, Clone)]
pub struct ProductSettings {
    /// Human-readable product name, also the `.app` bundle name on macOS.
    pub product_name: String,

    /// Company or author shown in installer metadata.
    pub company_name: String,

    /// Semantic version of the release.
    pub version: Version,

    /// Base name (without extension) of the application icon.
    pub icon_file_name: String,
}

impl ProductSettings {
    /// Product name with whitespace removed, as used in installer file names.
    pub fn compact_name(&self) -> String {
        self.product_name.split_whitespace().collect()
    }
}
