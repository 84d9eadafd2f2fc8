use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use panywhere_core::config::Config;
use panywhere_core::error::PanywhereError;
use panywhere_core::remote_path::RemotePath;
use panywhere_core::traits::transport::{ProviderApi, RawResponse};

/// Provider API over HTTPS, authenticated with the static API token.
///
/// Each method sends exactly one request and hands back the raw status,
/// media type and body.
pub struct HttpTransport {
    client: Client,
    config: Config,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, PanywhereError> {
        let response = request
            .header(AUTHORIZATION, self.config.authorization())
            .send()
            .await
            .map_err(|e| PanywhereError::Transport(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| PanywhereError::Transport(format!("reading body failed: {e}")))?
            .to_vec();

        debug!(status, content_type = ?content_type, bytes = body.len(), "response received");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait(?Send)]
impl ProviderApi for HttpTransport {
    async fn cpu_quota(&self) -> Result<RawResponse, PanywhereError> {
        let url = self.config.cpu_url()?;
        info!("GET {url}");
        self.send(self.client.get(url)).await
    }

    async fn upload_file(&self, path: &RemotePath, content: Vec<u8>) -> Result<RawResponse, PanywhereError> {
        let url = self.config.files_url(path)?;
        info!("POST {url} ({} bytes)", content.len());
        let part = Part::bytes(content).file_name(path.file_name().to_string());
        let form = Form::new().part("content", part);
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn fetch_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError> {
        let url = self.config.files_url(path)?;
        info!("GET {url}");
        self.send(self.client.get(url)).await
    }

    async fn delete_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError> {
        let url = self.config.files_url(path)?;
        info!("DELETE {url}");
        self.send(self.client.delete(url)).await
    }

    async fn reload_webapp(&self) -> Result<RawResponse, PanywhereError> {
        let url = self.config.reload_url()?;
        info!("POST {url}");
        self.send(self.client.post(url)).await
    }
}
