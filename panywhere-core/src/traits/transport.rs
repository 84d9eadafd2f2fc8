use async_trait::async_trait;

use crate::error::PanywhereError;
use crate::remote_path::RemotePath;

/// Status, media type and body of one provider response, before any
/// endpoint-specific interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// True when the media type is `application/json`, ignoring parameters
    /// such as `charset`.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One method per provider endpoint. Every call is a single request with
/// no retry; non-2xx statuses are returned, not raised.
#[async_trait(?Send)]
pub trait ProviderApi {
    async fn cpu_quota(&self) -> Result<RawResponse, PanywhereError>;
    async fn upload_file(&self, path: &RemotePath, content: Vec<u8>) -> Result<RawResponse, PanywhereError>;
    async fn fetch_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError>;
    async fn delete_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError>;
    async fn reload_webapp(&self) -> Result<RawResponse, PanywhereError>;
}
