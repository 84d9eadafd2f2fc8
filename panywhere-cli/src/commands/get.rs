use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use panywhere_core::config::Config;
use panywhere_core::reply::{decode_fetch, ApiReply, EntryKind, PathContent};
use panywhere_core::traits::transport::ProviderApi;

use super::{local_path, CommandResult};

/// Nerd Font folder icon.
pub const FOLDER_GLYPH: &str = "\u{f024b} ";
/// Nerd Font file icon.
pub const FILE_GLYPH: &str = "\u{f0214} ";

/// Fetch a remote path.
///
/// A directory is listed with one glyph-prefixed line per entry. A file is
/// written to the same relative path locally, creating parent directories as
/// needed, and echoed to the terminal. The HTTP status is always printed
/// first.
pub async fn run_get<A, W>(
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
    let response = api.fetch_path(&remote).await?;
    let status = response.status;

    writeln!(out, "Status code: {status}")?;

    match decode_fetch(response) {
        ApiReply::Success(PathContent::Listing(entries)) => {
            for entry in entries {
                let glyph = match entry.kind {
                    EntryKind::Directory => FOLDER_GLYPH,
                    EntryKind::File => FILE_GLYPH,
                };
                writeln!(out, "{glyph}{}", entry.name)?;
            }
        }
        ApiReply::Success(PathContent::File(content)) => {
            if !(200..300).contains(&status) {
                warn!("writing body of a {status} response to {file_path}");
            }

            let local = local_path(workdir, &remote);
            if let Some(parent) = local.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("failed to create directory {}: {e}", parent.display()))?;
            }
            tokio::fs::write(&local, &content)
                .await
                .map_err(|e| format!("failed to write {}: {e}", local.display()))?;
            info!("Wrote {} bytes to {}", content.len(), local.display());

            writeln!(out, "{}", String::from_utf8_lossy(&content))?;
        }
        ApiReply::ErrorDetail(detail) => writeln!(out, "{detail}")?,
        ApiReply::Unrecognized { status, body } => {
            writeln!(out, "Unexpected response ({status}): {body}")?
        }
    }

    Ok(())
}
