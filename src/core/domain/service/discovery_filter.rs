//! Filtering and enrichment of the blocks returned by `/discover_nodes`.

use crate::core::domain::{
    error::{FoundationError, FoundationResult, ValidationError},
    model::{
        DEFAULT_NETWORK_DETAILS_TIMEOUT, DiscoveredBlock, NodeAddress, NodeNetworkDetails,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Resolves network details for a list of nodes.
///
/// The discovery filter only needs this one capability from the transport, which
/// keeps it testable without an HTTP server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkDetailsFetcher: Send + Sync {
    async fn fetch_network_details(
        &self,
        nodes: Vec<NodeAddress>,
        timeout: Duration,
    ) -> FoundationResult<Vec<NodeNetworkDetails>>;
}

/// Options to filter the discovered nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryFilters {
    /// Include nodes that already belong to a cluster.
    #[serde(default)]
    pub include_configured: bool,
    /// Keep only the block with this serial number.
    #[serde(default, rename = "blockSN", skip_serializing_if = "Option::is_none")]
    pub block_sn: Option<String>,
    /// Keep only nodes whose CVM IPv6 link-local address contains this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    /// Keep only nodes with this IPMI IP. Implies fetching network details.
    #[serde(default, rename = "ipmiIP", skip_serializing_if = "Option::is_none")]
    pub ipmi_ip: Option<String>,
}

/// Extra information to fetch about each discovered node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchExtra {
    /// Fetch network information about each node. Defaults to true only when
    /// filtering by IPMI IP, which discovery alone does not report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_network_info: Option<bool>,
}

/// Applies [`DiscoveryFilters`] to raw discovery results, optionally merging in
/// network details.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    filters: DiscoveryFilters,
    fetch_network_info: bool,
    network_details_timeout: Duration,
}

impl DiscoveryFilter {
    /// Validates the option pairing and resolves the enrichment flag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOptionCombination`] when configured nodes
    /// are included while network details are fetched.
    pub fn new(filters: DiscoveryFilters, fetch_extra: FetchExtra) -> Result<Self, ValidationError> {
        let fetch_network_info = fetch_extra
            .fetch_network_info
            .unwrap_or(filters.ipmi_ip.is_some());

        if filters.include_configured && fetch_network_info {
            return Err(ValidationError::InvalidOptionCombination {
                first: "include_configured".to_string(),
                second: "fetch_network_info".to_string(),
            });
        }

        Ok(Self {
            filters,
            fetch_network_info,
            network_details_timeout: DEFAULT_NETWORK_DETAILS_TIMEOUT,
        })
    }

    /// Sets the timeout handed to the network details fetcher.
    pub fn with_network_details_timeout(mut self, timeout: Duration) -> Self {
        self.network_details_timeout = timeout;
        self
    }

    /// Whether [`apply`](Self::apply) will call the fetcher.
    pub fn fetches_network_info(&self) -> bool {
        self.fetch_network_info
    }

    /// Filters and enriches the blocks.
    ///
    /// The fetcher is called at most once, and never when no block survives the
    /// block serial filter.
    pub async fn apply<F>(
        &self,
        mut blocks: Vec<DiscoveredBlock>,
        fetcher: &F,
    ) -> FoundationResult<Vec<DiscoveredBlock>>
    where
        F: NetworkDetailsFetcher + ?Sized,
    {
        if let Some(block_sn) = &self.filters.block_sn {
            blocks.retain(|block| &block.block_id == block_sn);
        }
        if blocks.is_empty() {
            return Ok(blocks);
        }

        for block in &mut blocks {
            if !self.filters.include_configured {
                block.nodes.retain(|node| !node.is_configured());
            }
            if let Some(ipv6) = &self.filters.ipv6_address {
                block.nodes.retain(|node| node.matches_ipv6(ipv6));
            }
        }

        if self.fetch_network_info {
            self.enrich(&mut blocks, fetcher).await?;
        }

        if let Some(ipmi_ip) = &self.filters.ipmi_ip {
            blocks.retain(|block| block.has_ipmi_ip(ipmi_ip));
            // Only the first matching block is narrowed to the matching nodes.
            if let Some(first) = blocks.first_mut() {
                first.nodes.retain(|node| node.has_ipmi_ip(ipmi_ip));
            }
        }

        debug!(blocks = ?blocks, "Discovered nodes after filtering");

        Ok(blocks)
    }

    async fn enrich<F>(&self, blocks: &mut [DiscoveredBlock], fetcher: &F) -> FoundationResult<()>
    where
        F: NetworkDetailsFetcher + ?Sized,
    {
        let addresses: Vec<NodeAddress> = blocks
            .iter()
            .flat_map(|block| &block.nodes)
            .filter(|node| {
                self.filters
                    .ipv6_address
                    .as_deref()
                    .is_none_or(|ipv6| node.matches_ipv6(ipv6))
            })
            .filter_map(|node| node.ipv6_address.clone().map(NodeAddress::new))
            .collect();

        if addresses.is_empty() {
            return Ok(());
        }

        let details = fetcher
            .fetch_network_details(addresses, self.network_details_timeout)
            .await?;

        for node in blocks.iter_mut().flat_map(|block| block.nodes.iter_mut()) {
            let Some(address) = node.ipv6_address.clone() else {
                continue;
            };
            for detail in details
                .iter()
                .filter(|detail| detail.ipv6_address == address)
            {
                node.merge_details(detail).map_err(|e| {
                    FoundationError::InvalidResponse(format!(
                        "Failed to merge network details for {}: {}",
                        detail.ipv6_address, e
                    ))
                })?;
            }
        }

        Ok(())
    }
}
