//! Test doubles for the provider API: a recording in-memory fake for the
//! commands and an axum server speaking the provider's HTTP routes.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use panywhere_core::config::{Config, ENV_API_TOKEN, ENV_HOST, ENV_USER};
use panywhere_core::error::PanywhereError;
use panywhere_core::remote_path::RemotePath;
use panywhere_core::traits::transport::{ProviderApi, RawResponse};

pub const TEST_TOKEN: &str = "test-token";

/// Config for user `alice` pointed at `base_url`.
pub fn test_config(base_url: &str) -> Config {
    Config::from_vars(|key| match key {
        ENV_USER => Some("alice".to_string()),
        ENV_API_TOKEN => Some(TEST_TOKEN.to_string()),
        ENV_HOST => Some(base_url.to_string()),
        _ => None,
    })
    .expect("test config must be valid")
}

pub fn json_response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn file_response(status: u16, body: &[u8]) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("text/plain; charset=utf-8".to_string()),
        body: body.to_vec(),
    }
}

/// Replays queued responses in order and records every call as
/// `"<METHOD> <target>"`.
#[derive(Default)]
pub struct FakeApi {
    responses: RefCell<VecDeque<RawResponse>>,
    calls: RefCell<Vec<String>>,
    uploads: RefCell<Vec<Vec<u8>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: RawResponse) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.borrow().clone()
    }

    fn record(&self, call: String) -> Result<RawResponse, PanywhereError> {
        self.calls.borrow_mut().push(call.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PanywhereError::Transport(format!("no response queued for {call}")))
    }
}

#[async_trait(?Send)]
impl ProviderApi for FakeApi {
    async fn cpu_quota(&self) -> Result<RawResponse, PanywhereError> {
        self.record("GET cpu".to_string())
    }

    async fn upload_file(&self, path: &RemotePath, content: Vec<u8>) -> Result<RawResponse, PanywhereError> {
        self.uploads.borrow_mut().push(content);
        self.record(format!("POST {path}"))
    }

    async fn fetch_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError> {
        self.record(format!("GET {path}"))
    }

    async fn delete_path(&self, path: &RemotePath) -> Result<RawResponse, PanywhereError> {
        self.record(format!("DELETE {path}"))
    }

    async fn reload_webapp(&self) -> Result<RawResponse, PanywhereError> {
        self.record("POST reload".to_string())
    }
}

type Files = Arc<Mutex<BTreeMap<String, Vec<u8>>>>;

/// Handle to a running fake provider. Files are keyed by absolute remote path.
pub struct FakeProvider {
    pub base_url: String,
    files: Files,
}

impl FakeProvider {
    pub fn stored(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn insert(&self, path: &str, content: &[u8]) {
        self.files.lock().unwrap().insert(path.to_string(), content.to_vec());
    }
}

/// Serve the provider routes on an ephemeral loopback port.
pub async fn spawn_fake_provider() -> FakeProvider {
    let files: Files = Arc::default();

    let router = Router::new()
        .route("/api/v0/user/:user/cpu/", get(cpu_quota))
        .route("/api/v0/user/:user/webapps/:webhost/reload/", post(reload_webapp))
        .route(
            "/api/v0/user/:user/files/path/*path",
            get(fetch_path).post(upload_file).delete(delete_path),
        )
        .with_state(files.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeProvider {
        base_url: format!("http://{addr}/"),
        files,
    }
}

fn check_token(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Token {TEST_TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token." })),
        )
            .into_response()),
    }
}

fn remote_key(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

async fn cpu_quota(Path(_user): Path<String>, headers: HeaderMap) -> Response {
    if let Err(rejection) = check_token(&headers) {
        return rejection;
    }
    Json(json!({
        "daily_cpu_limit_seconds": 100,
        "next_reset_time": "2026-10-18T03:00:00",
        "daily_cpu_total_usage_seconds": 0.5
    }))
    .into_response()
}

async fn reload_webapp(Path((_user, _webhost)): Path<(String, String)>, headers: HeaderMap) -> Response {
    if let Err(rejection) = check_token(&headers) {
        return rejection;
    }
    Json(json!({ "status": "OK" })).into_response()
}

async fn upload_file(
    State(files): State<Files>,
    Path((_user, path)): Path<(String, String)>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(rejection) = check_token(&headers) {
        return rejection;
    }

    let mut content = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let is_content = field.name() == Some("content");
        if is_content {
            content = field.bytes().await.ok().map(|b| b.to_vec());
        }
    }
    let Some(content) = content else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "No content field." }))).into_response();
    };

    let replaced = files.lock().unwrap().insert(remote_key(&path), content).is_some();
    if replaced {
        StatusCode::OK.into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn fetch_path(
    State(files): State<Files>,
    Path((_user, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = check_token(&headers) {
        return rejection;
    }

    let key = remote_key(&path);
    let files = files.lock().unwrap();
    if let Some(content) = files.get(&key) {
        return ([(header::CONTENT_TYPE, "application/octet-stream")], content.clone()).into_response();
    }

    let prefix = format!("{key}/");
    let mut listing = Map::new();
    for stored in files.keys() {
        if let Some(rest) = stored.strip_prefix(&prefix) {
            let (name, kind) = match rest.split_once('/') {
                Some((dir, _)) => (dir, "directory"),
                None => (rest, "file"),
            };
            listing
                .entry(name.to_string())
                .or_insert_with(|| json!({ "type": kind }));
        }
    }

    if listing.is_empty() {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response()
    } else {
        Json(Value::Object(listing)).into_response()
    }
}

async fn delete_path(
    State(files): State<Files>,
    Path((_user, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = check_token(&headers) {
        return rejection;
    }

    match files.lock().unwrap().remove(&remote_key(&path)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "File does not exist" })),
        )
            .into_response(),
    }
}
