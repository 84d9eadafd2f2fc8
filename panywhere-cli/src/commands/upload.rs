use std::io::Write;
use std::path::Path;

use tracing::info;

use panywhere_core::config::Config;
use panywhere_core::reply::{decode_upload, UploadOutcome};
use panywhere_core::traits::transport::ProviderApi;

use super::{local_path, CommandResult};

/// Upload a local file to the same relative path under the site directory.
///
/// The provider answers 200 when it replaced an existing file, which is
/// reported as "updated"; any other status is reported as "created".
pub async fn run_upload<A, W>(
    api: &A,
    config: &Config,
    workdir: &Path,
    file_path: &str,
    out: &mut W,
) -> CommandResult
where
    A: ProviderApi + ?Sized,
    W: Write,
{
    let remote = config.remote_path(file_path)?;
    let local = local_path(workdir, &remote);

    info!("Reading file: {}", local.display());
    let content = tokio::fs::read(&local)
        .await
        .map_err(|e| format!("failed to read file '{file_path}': {e}"))?;

    info!("Uploading {} bytes to {remote}", content.len());
    let response = api.upload_file(&remote, content).await?;

    match decode_upload(&response) {
        UploadOutcome::Updated => writeln!(out, "File '{file_path}' was updated.")?,
        UploadOutcome::Created => writeln!(out, "File '{file_path}' was created.")?,
    }

    Ok(())
}
