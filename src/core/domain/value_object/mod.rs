mod foundation_host;
mod foundation_port;
mod foundation_url;

pub use foundation_host::FoundationHost;
pub use foundation_port::{DEFAULT_FOUNDATION_PORT, FoundationPort};
pub use foundation_url::FoundationUrl;
