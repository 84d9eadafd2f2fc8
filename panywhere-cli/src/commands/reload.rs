use std::io::Write;

use tracing::debug;

use panywhere_core::reply::{decode_reload, ApiReply};
use panywhere_core::traits::transport::ProviderApi;

use super::CommandResult;

/// Reload the configured web app and print the reported status, if any.
pub async fn run_reload<A, W>(api: &A, out: &mut W) -> CommandResult
where
    A: ProviderApi + ?Sized,
    W: Write,
{
    let response = api.reload_webapp().await?;

    match decode_reload(&response) {
        ApiReply::Success(status) => writeln!(out, "Status: {status}")?,
        other => debug!("reload response without status field: {other:?}"),
    }

    Ok(())
}
