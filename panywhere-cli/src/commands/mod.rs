//! CLI command implementations (cpu, upload, get, remove, reload, upload-hook).
//!
//! Commands write their user-facing output to the supplied writer; progress
//! and diagnostics go through `tracing`.

pub mod cpu;
pub mod upload;
pub mod get;
pub mod remove;
pub mod reload;
pub mod hook;

use std::path::{Path, PathBuf};

use panywhere_core::remote_path::RemotePath;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Local counterpart of a remote path: its relative components under `workdir`.
pub(crate) fn local_path(workdir: &Path, remote: &RemotePath) -> PathBuf {
    workdir.join(remote.relative_components().collect::<PathBuf>())
}
