//! In-memory transport answering from canned responses.
//!
//! Used for tests and demos instead of patching the HTTP layer at runtime: the
//! client is simply built with a `FixtureTransport` in place of the HTTP one.

use crate::core::{
    domain::error::{FoundationError, FoundationResult, ValidationError},
    infrastructure::transport::{Query, Transport},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{collections::HashMap, path::Path};
use tokio::sync::Mutex;

/// HTTP method of a fixture or recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureMethod {
    Get,
    Post,
}

/// A request the fixture transport received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: FixtureMethod,
    /// Endpoint path without leading slash, e.g. `discover_nodes`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// A [`Transport`] with a fixed response per endpoint.
///
/// Every request is recorded so tests can assert on call counts and payloads.
/// Requests to endpoints without a fixture fail with a 404 `Api` error.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    responses: HashMap<(FixtureMethod, String), Value>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the JSON answered to GET requests on `path`.
    pub fn on_get(mut self, path: &str, response: Value) -> Self {
        self.responses
            .insert((FixtureMethod::Get, normalize(path)), response);
        self
    }

    /// Registers a plain-text body answered to GET requests on `path`.
    pub fn on_get_text(self, path: &str, response: impl Into<String>) -> Self {
        self.on_get(path, Value::String(response.into()))
    }

    /// Registers the JSON answered to POST requests on `path`.
    pub fn on_post(mut self, path: &str, response: Value) -> Self {
        self.responses
            .insert((FixtureMethod::Post, normalize(path)), response);
        self
    }

    /// Loads fixtures from a directory.
    ///
    /// Files are named `get_<endpoint>.json`, `post_<endpoint>.json` or
    /// `get_<endpoint>.txt` (plain-text bodies such as `get_version.txt`). Other
    /// files are ignored.
    ///
    /// # Errors
    /// Returns a validation error if the directory or a fixture cannot be read or parsed.
    pub async fn from_dir(dir: impl AsRef<Path>) -> FoundationResult<Self> {
        let dir = dir.as_ref();
        let mut fixtures = Self::new();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| fixture_error(dir, e))?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| fixture_error(dir, e))? {
            let file = entry.path();
            let (Some(stem), Some(ext)) = (
                file.file_stem().and_then(|s| s.to_str()),
                file.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let (method, endpoint) = match stem.split_once('_') {
                Some(("get", endpoint)) => (FixtureMethod::Get, endpoint),
                Some(("post", endpoint)) => (FixtureMethod::Post, endpoint),
                _ => continue,
            };

            let contents = tokio::fs::read_to_string(&file)
                .await
                .map_err(|e| fixture_error(&file, e))?;
            let response: Value = match ext {
                "json" => serde_json::from_str(&contents).map_err(|e| fixture_error(&file, e))?,
                "txt" => Value::String(contents.trim_end().to_string()),
                _ => continue,
            };
            fixtures
                .responses
                .insert((method, endpoint.to_string()), response);
        }

        Ok(fixtures)
    }

    /// Returns every request received so far, in order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received for `path` with any method.
    pub async fn request_count(&self, path: &str) -> usize {
        let path = normalize(path);
        self.requests
            .lock()
            .await
            .iter()
            .filter(|req| req.path == path)
            .count()
    }

    async fn respond(
        &self,
        method: FixtureMethod,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> FoundationResult<Value> {
        let path = normalize(path);
        self.requests.lock().await.push(RecordedRequest {
            method,
            path: path.clone(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.cloned(),
        });

        self.responses
            .get(&(method, path.clone()))
            .cloned()
            .ok_or_else(|| FoundationError::Api {
                status: 404,
                message: format!("No fixture for {:?} /{}", method, path),
            })
    }
}

fn fixture_error(path: &Path, e: impl std::fmt::Display) -> FoundationError {
    ValidationError::ConstraintViolation(format!(
        "Cannot load fixture {}: {}",
        path.display(),
        e
    ))
    .into()
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn get_json(&self, path: &str, query: Query<'_>) -> FoundationResult<Value> {
        self.respond(FixtureMethod::Get, path, query, None).await
    }

    async fn get_text(&self, path: &str, query: Query<'_>) -> FoundationResult<String> {
        match self.respond(FixtureMethod::Get, path, query, None).await? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> FoundationResult<Value> {
        self.respond(FixtureMethod::Post, path, &[], Some(body)).await
    }
}
