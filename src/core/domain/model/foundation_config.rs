use std::time::Duration;

/// Default timeout for requests to the Foundation VM.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(55_000);

/// Default time the appliance may spend resolving node network details.
pub const DEFAULT_NETWORK_DETAILS_TIMEOUT: Duration = Duration::from_secs(45);

/// Client-side settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationConfig {
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Timeout passed to `/node_network_details`, in whole seconds on the wire.
    pub network_details_timeout: Duration,
}

impl Default for FoundationConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            network_details_timeout: DEFAULT_NETWORK_DETAILS_TIMEOUT,
        }
    }
}
