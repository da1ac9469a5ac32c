//! HTTP transport that talks to a Foundation appliance with `reqwest`.

use crate::core::{
    domain::{
        error::{FoundationError, FoundationResult},
        model::FoundationConfig,
        value_object::FoundationUrl,
    },
    infrastructure::transport::{Query, Transport},
};
use async_trait::async_trait;
use reqwest::{
    Client, Method, Response,
    header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use url::Url;

/// Production [`Transport`]: one `reqwest` client with the appliance's default
/// headers and the configured request timeout.
///
/// Requests are sent exactly once. Timeouts and connection failures surface as
/// `FoundationError::Connection`, non-success statuses as `FoundationError::Api`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: FoundationUrl,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` rooted at `base_url`.
    ///
    /// # Errors
    /// Returns `FoundationError::Connection` if the HTTP client cannot be built.
    pub fn new(base_url: FoundationUrl, config: &FoundationConfig) -> FoundationResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("chunked"));

        let http_client = Client::builder()
            .default_headers(default_headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FoundationError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Returns the API root this transport sends requests to.
    pub fn base_url(&self) -> &FoundationUrl {
        &self.base_url
    }

    fn url(&self, path: &str, query: Query<'_>) -> FoundationResult<Url> {
        let mut url = self.base_url.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    /// Sends the request and turns transport failures and non-success statuses
    /// into errors.
    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> FoundationResult<Response> {
        let mut req_builder = self.http_client.request(method, url);
        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FoundationError::Connection(format!("HTTP request timed out: {}", e))
            } else {
                FoundationError::Connection(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(FoundationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str, query: Query<'_>) -> FoundationResult<Value> {
        let url = self.url(path, query)?;
        self.send(Method::GET, url, None)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| FoundationError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn get_text(&self, path: &str, query: Query<'_>) -> FoundationResult<String> {
        let url = self.url(path, query)?;
        self.send(Method::GET, url, None)
            .await?
            .text()
            .await
            .map_err(|e| FoundationError::Connection(format!("Failed to read response: {}", e)))
    }

    async fn post_json(&self, path: &str, body: &Value) -> FoundationResult<Value> {
        let url = self.url(path, &[])?;
        self.send(Method::POST, url, Some(body))
            .await?
            .json::<Value>()
            .await
            .map_err(|e| FoundationError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}
