//! The HTTP capability the client is built on.
//!
//! A transport is chosen once when the client is built: [`HttpTransport`] talks to a
//! real appliance, [`FixtureTransport`] answers from canned responses.
//!
//! [`HttpTransport`]: super::http_transport::HttpTransport
//! [`FixtureTransport`]: super::fixture_transport::FixtureTransport

use crate::core::domain::error::FoundationResult;
use async_trait::async_trait;
use serde_json::Value;

/// Query parameters as ordered key/value pairs.
pub type Query<'a> = &'a [(&'a str, &'a str)];

/// Request/response access to the Foundation API.
///
/// Paths are relative to the API root (`/foundation/`); a leading slash is ignored.
/// Implementations report network failures as `Connection`, non-success statuses as
/// `Api` and undecodable bodies as `InvalidResponse`. They never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and decodes the body as JSON.
    async fn get_json(&self, path: &str, query: Query<'_>) -> FoundationResult<Value>;

    /// Performs a GET request and returns the raw body.
    async fn get_text(&self, path: &str, query: Query<'_>) -> FoundationResult<String>;

    /// Performs a POST request with a JSON body and decodes the response as JSON.
    async fn post_json(&self, path: &str, body: &Value) -> FoundationResult<Value>;
}
