use std::io::{self, BufRead, Write};

use tracing::debug;

use panywhere_core::config::Config;
use panywhere_core::reply::{decode_delete, ApiReply};
use panywhere_core::traits::transport::ProviderApi;

use super::CommandResult;

/// Delete a remote file after the user confirms with exactly `Y`.
///
/// Any other answer, including an empty line or end of input, returns
/// without touching the network or printing anything further.
pub async fn run_remove<A, R, W>(
    api: &A,
    config: &Config,
    file_path: &str,
    input: &mut R,
    out: &mut W,
) -> CommandResult
where
    A: ProviderApi + ?Sized,
    R: BufRead,
    W: Write,
{
    let remote = config.remote_path(file_path)?;

    let prompt = format!("Are you sure you want to delete the file '{file_path}'? Y/N (N) ");
    if !confirm(&prompt, input, out)? {
        debug!("deletion of {remote} declined");
        return Ok(());
    }

    let response = api.delete_path(&remote).await?;

    match decode_delete(&response) {
        ApiReply::Success(()) => writeln!(out, "The file '{file_path}' was deleted.")?,
        ApiReply::ErrorDetail(message) => writeln!(out, "ERROR: {message}")?,
        ApiReply::Unrecognized { status, body } => {
            writeln!(out, "ERROR: unexpected status code {status}: {body}")?
        }
    }

    Ok(())
}

fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(answer.trim_end_matches(['\r', '\n']) == "Y")
}
