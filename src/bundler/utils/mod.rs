//! Shared helpers for packagers.

pub mod fs;
pub mod process;
