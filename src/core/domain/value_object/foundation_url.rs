use crate::core::domain::{
    error::ValidationError,
    value_object::{FoundationHost, FoundationPort},
};
use url::Url;

const API_ROOT: &str = "foundation/";

/// Base URL of the Foundation API, `http://{host}:{port}/foundation/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationUrl(Url);

impl FoundationUrl {
    /// Builds the API base URL for a host and port.
    pub fn new(host: &FoundationHost, port: FoundationPort) -> Result<Self, ValidationError> {
        let authority = if host.is_ipv6() {
            format!("[{}]", host.as_str())
        } else {
            host.as_str().to_string()
        };
        let raw = format!("http://{}:{}/{}", authority, port.get(), API_ROOT);
        Self::parse(&raw)
    }

    /// Parses an already formed base URL (used to point the client at a test server).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        validate_url(raw)?;
        let mut url =
            Url::parse(raw).map_err(|e| ValidationError::Format(format!("Invalid URL: {}", e)))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Resolves an endpoint path (with or without a leading slash) against the base.
    pub fn endpoint(&self, path: &str) -> Result<Url, ValidationError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|e| ValidationError::Format(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// Returns the base URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validates that a base URL is an absolute http(s) URL.
pub(crate) fn validate_url(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    let url =
        Url::parse(raw).map_err(|e| ValidationError::Format(format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be one of: http, https",
            other
        ))),
    }
}
