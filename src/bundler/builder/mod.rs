//! Packaging orchestration and the shared steps around it.
//!
//! This module provides the [`Orchestrator`] that drives the host's packager
//! and the post-packaging steps every platform shares.
//!
//! # Overview
//!
//! A run:
//! 1. Packages installers with the host's [`Packager`](crate::bundler::platform::Packager)
//! 2. Generates checksums when the packager's policy asks for them
//! 3. Writes the bundle size report
//! 4. Returns a [`RunSummary`]
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 sidecars and `checksums.txt`
//! - [`locator`] - resolve tool output names by glob
//! - [`orchestrator`] - [`Orchestrator`] and run outcome classification
//! - [`size_report`] - `bundle-size.json`
//! - [`tool_detection`] - locate external tool executables

pub mod checksum;
pub mod locator;
pub mod orchestrator;
pub mod size_report;
pub mod tool_detection;

pub use checksum::{ChecksumAlgorithm, ChecksumRecord, generate_checksums};
pub use locator::{resolve_in, resolve_one};
pub use orchestrator::{Orchestrator, RunOutcome, RunSummary};
pub use size_report::write_bundle_size_report;
