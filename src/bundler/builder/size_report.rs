//! Bundle size report.
//!
//! Writes `bundle-size.json` in the output root: a JSON object mapping each
//! configured report key to the byte size of its file.

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::DistributionInfo,
    utils::fs,
};
use std::{collections::BTreeMap, path::PathBuf};

/// File name of the report.
pub const SIZE_REPORT_FILE_NAME: &str = "bundle-size.json";

/// Collects sizes for every configured entry and writes the report.
///
/// # Returns
///
/// Path of the written `bundle-size.json`.
pub async fn write_bundle_size_report(dist: &DistributionInfo) -> Result<PathBuf> {
    log::info!("Writing bundle size info…");

    let mut sizes = BTreeMap::new();
    for (key, path) in dist.size_report_entries() {
        let metadata = tokio::fs::metadata(&path)
            .await
            .fs_context("reading bundle size", &path)?;
        log::debug!("{} = {} bytes ({})", key, metadata.len(), path.display());
        sizes.insert(key.to_string(), metadata.len());
    }

    let report = dist.output_root().join(SIZE_REPORT_FILE_NAME);
    let json = serde_json::to_string(&sizes)?;
    fs::write_atomic(&report, json).await?;

    Ok(report)
}
