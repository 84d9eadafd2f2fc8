use std::env;

use url::Url;

use crate::error::{PanywhereError, Result};
use crate::remote_path::RemotePath;

pub const ENV_USER: &str = "PYTHONANYWHERE_USER";
pub const ENV_API_TOKEN: &str = "PYTHONANYWHERE_API_TOKEN";
pub const ENV_HOST: &str = "PYTHONANYWHERE_HOST";
pub const ENV_WEBHOST: &str = "PYTHONANYWHERE_WEBHOST";
pub const ENV_SITE_PATH: &str = "PYTHONANYWHERE_SITE_PATH";

pub const DEFAULT_HOST: &str = "https://www.pythonanywhere.com/";
pub const DEFAULT_SITE_PATH: &str = "mysite";
const WEBHOST_DOMAIN: &str = "pythonanywhere.com";

/// Session context for one invocation, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account name; also the home directory name on the server.
    pub username: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: String,
    /// Base URL of the API host. The `api/v0/...` segments are appended to it.
    pub host: Url,
    /// Domain of the web app targeted by `reload`.
    pub webhost: String,
    /// Directory under `/home/<username>` that local paths are mirrored into.
    pub site_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `PYTHONANYWHERE_USER` (required): account username.
    /// - `PYTHONANYWHERE_API_TOKEN` (optional, default empty).
    /// - `PYTHONANYWHERE_HOST` (optional, default `https://www.pythonanywhere.com/`).
    /// - `PYTHONANYWHERE_WEBHOST` (optional, default `<username>.pythonanywhere.com`).
    /// - `PYTHONANYWHERE_SITE_PATH` (optional, default `mysite`).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = get(ENV_USER)
            .ok_or_else(|| PanywhereError::Config(format!("{ENV_USER} is not set")))?;

        let token = get(ENV_API_TOKEN).unwrap_or_default();

        let host_str = get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = Url::parse(&host_str)
            .map_err(|e| PanywhereError::Config(format!("invalid {ENV_HOST} '{host_str}': {e}")))?;
        if host.cannot_be_a_base() {
            return Err(PanywhereError::Config(format!(
                "{ENV_HOST} '{host_str}' cannot be used as a base URL"
            )));
        }

        let webhost = get(ENV_WEBHOST).unwrap_or_else(|| format!("{username}.{WEBHOST_DOMAIN}"));
        let site_path = get(ENV_SITE_PATH).unwrap_or_else(|| DEFAULT_SITE_PATH.to_string());

        Ok(Self {
            username,
            token,
            host,
            webhost,
            site_path,
        })
    }

    /// Absolute server directory that relative paths resolve against.
    pub fn base_dir(&self) -> String {
        format!("/home/{}/{}", self.username, self.site_path.trim_matches('/'))
    }

    /// Resolve a user-supplied relative path to its remote counterpart.
    pub fn remote_path(&self, relative: &str) -> Result<RemotePath> {
        RemotePath::new(&self.base_dir(), relative)
    }

    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }

    /// `GET {host}/api/v0/user/{username}/cpu/`
    pub fn cpu_url(&self) -> Result<Url> {
        self.endpoint(["cpu", ""])
    }

    /// `{host}/api/v0/user/{username}/files/path/{remote_path}`
    pub fn files_url(&self, path: &RemotePath) -> Result<Url> {
        self.endpoint(["files", "path"].into_iter().chain(path.components()))
    }

    /// `POST {host}/api/v0/user/{username}/webapps/{webhost}/reload/`
    pub fn reload_url(&self) -> Result<Url> {
        self.endpoint(["webapps", self.webhost.as_str(), "reload", ""])
    }

    /// Append `api/v0/user/{username}` and `segments` to the host URL. Every
    /// segment is percent-encoded on its own, so a `/` inside one is escaped.
    /// A trailing empty segment yields a trailing slash.
    fn endpoint<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|_| PanywhereError::Config(format!("host '{}' cannot be a base URL", self.host)))?
            .pop_if_empty()
            .extend(["api", "v0", "user", self.username.as_str()])
            .extend(segments);
        Ok(url)
    }
}
