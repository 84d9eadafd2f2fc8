//! Per-endpoint interpretation of provider responses.
//!
//! Every decoder checks for the fields it needs instead of assuming them;
//! anything it cannot make sense of comes back as [`ApiReply::Unrecognized`]
//! carrying the raw status and body.

use serde_json::{Map, Value};
use tracing::debug;

use crate::traits::transport::RawResponse;

/// Outcome of a provider call after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    Success(T),
    /// The provider explained the failure in a `detail` or `message` field.
    ErrorDetail(String),
    Unrecognized { status: u16, body: String },
}

impl<T> ApiReply<T> {
    fn unrecognized(response: &RawResponse) -> Self {
        ApiReply::Unrecognized {
            status: response.status,
            body: response.body_text(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Updated,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// What a GET on a files path returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathContent {
    Listing(Vec<DirEntry>),
    File(Vec<u8>),
}

/// 200 means an existing file was replaced; the provider answers a fresh
/// upload with 201, and every other status is reported the same way.
pub fn decode_upload(response: &RawResponse) -> UploadOutcome {
    if response.status == 200 {
        UploadOutcome::Updated
    } else {
        UploadOutcome::Created
    }
}

/// JSON bodies are directory listings or a `detail` error; anything else is
/// the file itself, whatever the status.
pub fn decode_fetch(response: RawResponse) -> ApiReply<PathContent> {
    if !response.is_json() {
        return ApiReply::Success(PathContent::File(response.body));
    }

    let Some(object) = parse_object(&response) else {
        return ApiReply::unrecognized(&response);
    };

    if let Some(detail) = object.get("detail") {
        return ApiReply::ErrorDetail(value_text(detail));
    }

    let entries = object
        .iter()
        .map(|(name, meta)| DirEntry {
            name: name.clone(),
            kind: entry_kind(meta),
        })
        .collect();
    ApiReply::Success(PathContent::Listing(entries))
}

/// 204 is the only success. Failures carry `message`, falling back to
/// `detail`.
pub fn decode_delete(response: &RawResponse) -> ApiReply<()> {
    if response.status == 204 {
        return ApiReply::Success(());
    }

    let explanation = parse_object(response).and_then(|object| {
        object
            .get("message")
            .or_else(|| object.get("detail"))
            .map(value_text)
    });

    match explanation {
        Some(text) => ApiReply::ErrorDetail(text),
        None => ApiReply::unrecognized(response),
    }
}

/// Quota fields in the order the provider sent them. Only a 200 body is
/// parsed.
pub fn decode_cpu(response: &RawResponse) -> ApiReply<Vec<(String, String)>> {
    if response.status != 200 {
        return ApiReply::unrecognized(response);
    }

    match parse_object(response) {
        Some(object) => ApiReply::Success(
            object
                .iter()
                .map(|(key, value)| (key.clone(), value_text(value)))
                .collect(),
        ),
        None => ApiReply::unrecognized(response),
    }
}

/// The reload endpoint's `status` field, when present.
pub fn decode_reload(response: &RawResponse) -> ApiReply<String> {
    match parse_object(response).and_then(|object| object.get("status").map(value_text)) {
        Some(status) => ApiReply::Success(status),
        None => ApiReply::unrecognized(response),
    }
}

fn parse_object(response: &RawResponse) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(object)) => Some(object),
        Ok(other) => {
            debug!(status = response.status, "JSON body is not an object: {other}");
            None
        }
        Err(e) => {
            debug!(status = response.status, "body is not JSON: {e}");
            None
        }
    }
}

fn entry_kind(meta: &Value) -> EntryKind {
    match meta.get("type").and_then(Value::as_str) {
        Some("directory") => EntryKind::Directory,
        _ => EntryKind::File,
    }
}

/// Strings without quotes; other JSON values in their JSON form.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
