mod discovery_filter;
mod payload_builder;

pub use discovery_filter::{DiscoveryFilter, DiscoveryFilters, FetchExtra, NetworkDetailsFetcher};
pub use payload_builder::PayloadBuilder;
