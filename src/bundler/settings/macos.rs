//! macOS platform-specific settings.

use std::path::PathBuf;

/// macOS packaging configuration.
#[derive(Clone, Debug, Default)]
pub struct MacOsSettings {
    /// Destination of the zipped `.app` bundle.
    ///
    /// Default: `<output root>/<product name>.zip`
    pub zip_path: Option<PathBuf>,
}
