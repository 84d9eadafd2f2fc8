use std::io::Write;

use panywhere_core::reply::{decode_cpu, ApiReply};
use panywhere_core::traits::transport::ProviderApi;

use super::CommandResult;

/// Print the account's CPU quota fields in the order the API returns them.
pub async fn run_cpu<A, W>(api: &A, out: &mut W) -> CommandResult
where
    A: ProviderApi + ?Sized,
    W: Write,
{
    let response = api.cpu_quota().await?;

    match decode_cpu(&response) {
        ApiReply::Success(fields) => {
            writeln!(out, "CPU quota info:")?;
            for (key, value) in fields {
                writeln!(out, "{key}: {value}")?;
            }
        }
        ApiReply::ErrorDetail(detail) => writeln!(out, "ERROR: {detail}")?,
        ApiReply::Unrecognized { status, body } => {
            writeln!(out, "Got unexpected status code {status}: {body}")?
        }
    }

    Ok(())
}
