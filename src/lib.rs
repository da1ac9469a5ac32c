mod core;

pub use crate::core::domain::error::{FoundationError, FoundationResult, ValidationError};
pub use crate::core::domain::model::{
    AdvancedOptions, BUNDLED_HYPERVISOR, ClusterDescriptor, DEFAULT_NETWORK_DETAILS_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT, DiscoveredBlock, DiscoveredNode, FoundationConfig,
    HypervisorSelection, ImagePayload, ImageRequest, ImagingOperation, LogContents, LogType,
    NodeAddress, NodeNetworkDetails, NodeSpec, OperationFlags, PayloadBlock, PayloadCluster,
    PayloadNode, PayloadTests, ProgressStatus, UcsCredentials,
};
pub use crate::core::domain::service::{
    DiscoveryFilter, DiscoveryFilters, FetchExtra, NetworkDetailsFetcher, PayloadBuilder,
};
pub use crate::core::domain::value_object::{
    DEFAULT_FOUNDATION_PORT, FoundationHost, FoundationPort, FoundationUrl,
};
pub use crate::core::infrastructure::{
    fixture_transport::{FixtureMethod, FixtureTransport, RecordedRequest},
    http_transport::HttpTransport,
    transport::{Query, Transport},
};

use crate::core::domain::model::{NetworkDetailsRequest, NetworkDetailsResponse};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Returned by [`FoundationClient::version`] when the appliance cannot be asked.
pub const UNKNOWN_VERSION: &str = "unknown";

/// A Client for interacting with the Foundation appliance API
///
/// This client provides a typed interface for:
/// - Discovering nodes and resolving their network details
/// - Building imaging payloads, imaging nodes and configuring IPMI
/// - Monitoring progress and fetching node and cluster logs
///
/// # Examples
///
/// ```no_run
/// use foundation_client::{DiscoveryFilters, FetchExtra, FoundationClient, FoundationResult};
///
/// #[tokio::main]
/// async fn main() -> FoundationResult<()> {
///     let client = FoundationClient::builder()
///         .host("10.38.43.50")?
///         .build()?;
///
///     let blocks = client
///         .discover_nodes(DiscoveryFilters::default(), FetchExtra::default())
///         .await?;
///     println!("{} blocks discovered", blocks.len());
///     Ok(())
/// }
/// ```
pub struct FoundationClient {
    transport: Arc<dyn Transport>,
    config: FoundationConfig,
    payload_builder: PayloadBuilder,
    version: OnceCell<String>,
}

/// Builder for FoundationClient configuration
#[derive(Default)]
pub struct FoundationClientBuilder {
    host: Option<FoundationHost>,
    port: Option<FoundationPort>,
    base_url: Option<FoundationUrl>,
    config: FoundationConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl FoundationClientBuilder {
    /// IP or hostname of the Foundation VM.
    pub fn host(mut self, host: impl Into<String>) -> FoundationResult<Self> {
        self.host = Some(FoundationHost::new(host)?);
        Ok(self)
    }

    /// Port of the Foundation service. Defaults to 8000.
    pub fn port(mut self, port: u16) -> FoundationResult<Self> {
        self.port = Some(FoundationPort::new(port)?);
        Ok(self)
    }

    /// Full API root, overriding host and port (e.g. a proxy or a test server).
    pub fn base_url(mut self, url: &str) -> FoundationResult<Self> {
        self.base_url = Some(FoundationUrl::parse(url)?);
        Ok(self)
    }

    /// Timeout for every request to the Foundation VM. Defaults to 55 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Time the appliance may spend resolving node network details. Defaults to 45 seconds.
    pub fn network_details_timeout(mut self, timeout: Duration) -> Self {
        self.config.network_details_timeout = timeout;
        self
    }

    /// Uses a custom transport instead of HTTP.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Answers every request from canned fixtures. Only use for testing.
    pub fn fixtures(self, fixtures: Arc<FixtureTransport>) -> Self {
        self.transport(fixtures)
    }

    pub fn build(self) -> FoundationResult<FoundationClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let base_url = match (self.base_url, self.host) {
                    (Some(url), _) => url,
                    (None, Some(host)) => {
                        FoundationUrl::new(&host, self.port.unwrap_or_default())?
                    }
                    (None, None) => {
                        return Err(ValidationError::Field {
                            field: "host".to_string(),
                            message: "Host is required".to_string(),
                        }
                        .into());
                    }
                };
                Arc::new(HttpTransport::new(base_url, &self.config)?)
            }
        };

        Ok(FoundationClient {
            transport,
            config: self.config,
            payload_builder: PayloadBuilder::new(),
            version: OnceCell::new(),
        })
    }
}

impl FoundationClient {
    /// Creates a new builder for FoundationClient configuration
    pub fn builder() -> FoundationClientBuilder {
        FoundationClientBuilder::default()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &FoundationConfig {
        &self.config
    }

    /// Version of the Foundation service.
    ///
    /// The first successful or failed lookup is cached. Failures are never raised:
    /// they yield [`UNKNOWN_VERSION`].
    pub async fn version(&self) -> String {
        self.version
            .get_or_init(|| async {
                match self.transport.get_text("version", &[]).await {
                    Ok(version) => version.trim().to_string(),
                    Err(e) => {
                        warn!(error = %e, "Could not read the Foundation version");
                        UNKNOWN_VERSION.to_string()
                    }
                }
            })
            .await
            .clone()
    }

    /// Builds the imaging payload without sending it.
    ///
    /// # Errors
    /// Returns a validation error if the request has no nodes or no operation.
    pub fn generate_image_node_payload(&self, request: &ImageRequest) -> FoundationResult<ImagePayload> {
        self.payload_builder.build_request(request)
    }

    /// Images a set of nodes.
    ///
    /// When `advanced.configure_ipmi` is set, the IPMI interfaces are configured
    /// first with the same payload.
    pub async fn image_nodes(&self, request: &ImageRequest) -> FoundationResult<Value> {
        let payload = self.encode_payload(request)?;

        if request.advanced.configure_ipmi {
            self.transport.post_json("ipmi_config", &payload).await?;
        }

        self.transport.post_json("image_nodes", &payload).await
    }

    /// Configures the IPMI interfaces on the requested nodes.
    pub async fn ipmi_config(&self, request: &ImageRequest) -> FoundationResult<Value> {
        let payload = self.encode_payload(request)?;
        self.transport.post_json("ipmi_config", &payload).await
    }

    /// Progress of the current imaging session.
    pub async fn progress(&self) -> FoundationResult<ProgressStatus> {
        let response = self.transport.get_json("progress", &[]).await?;
        decode(response, "progress")
    }

    /// Imaging log of one node, identified by its hypervisor IP.
    pub async fn node_log(&self, node_ip: &str, session_id: Option<&str>) -> FoundationResult<LogContents> {
        let log_contents = self
            .fetch_log("node_log", "hypervisor_ip", node_ip, session_id)
            .await?;
        Ok(LogContents {
            ip: node_ip.to_string(),
            log_contents,
            log_type: LogType::Node,
        })
    }

    /// Cluster formation log, identified by a CVM IP of the cluster.
    pub async fn cluster_log(
        &self,
        cluster_ip: &str,
        session_id: Option<&str>,
    ) -> FoundationResult<LogContents> {
        let log_contents = self
            .fetch_log("cluster_log", "cvm_ip", cluster_ip, session_id)
            .await?;
        Ok(LogContents {
            ip: cluster_ip.to_string(),
            log_contents,
            log_type: LogType::Cluster,
        })
    }

    /// Discovers nodes running AOS, filtered and optionally enriched with network details.
    ///
    /// # Errors
    /// Rejects `include_configured` combined with network info before any request
    /// is made; transport errors are returned unchanged.
    pub async fn discover_nodes(
        &self,
        filters: DiscoveryFilters,
        fetch_extra: FetchExtra,
    ) -> FoundationResult<Vec<DiscoveredBlock>> {
        let filter = DiscoveryFilter::new(filters, fetch_extra)?
            .with_network_details_timeout(self.config.network_details_timeout);

        let response = self.transport.get_json("discover_nodes", &[]).await?;
        let blocks: Vec<DiscoveredBlock> = decode(response, "discover_nodes")?;

        filter.apply(blocks, self).await
    }

    /// Network details of a single node. `timeout` defaults to the configured one.
    pub async fn node_network_details(
        &self,
        ipv6_address: &str,
        timeout: Option<Duration>,
    ) -> FoundationResult<Vec<NodeNetworkDetails>> {
        self.node_network_details_array(&[NodeAddress::new(ipv6_address)], timeout)
            .await
    }

    /// Network details of several nodes. `timeout` defaults to the configured one.
    pub async fn node_network_details_array(
        &self,
        nodes: &[NodeAddress],
        timeout: Option<Duration>,
    ) -> FoundationResult<Vec<NodeNetworkDetails>> {
        let timeout = timeout.unwrap_or(self.config.network_details_timeout);
        let body = encode(&NetworkDetailsRequest {
            nodes,
            timeout: whole_seconds(timeout).to_string(),
        })?;

        let response = self
            .transport
            .post_json("node_network_details", &body)
            .await?;
        debug!(response = %response, "Node network details");

        let response: NetworkDetailsResponse = decode(response, "node_network_details")?;
        Ok(response.nodes)
    }

    /// Provisions the network of the given nodes and returns the raw response.
    pub async fn provision_network<T>(&self, nodes: &[T]) -> FoundationResult<Value>
    where
        T: Serialize,
    {
        let body = json!({ "nodes": encode(nodes)? });
        let response = self.transport.post_json("provision_network", &body).await?;
        debug!(response = %response, "Provision network");
        Ok(response)
    }

    fn encode_payload(&self, request: &ImageRequest) -> FoundationResult<Value> {
        let payload = self.generate_image_node_payload(request)?;
        encode(&payload)
    }

    async fn fetch_log(
        &self,
        endpoint: &str,
        ip_param: &str,
        ip: &str,
        session_id: Option<&str>,
    ) -> FoundationResult<String> {
        let mut query = vec![(ip_param, ip)];
        if let Some(session_id) = session_id {
            query.push(("session_id", session_id));
        }
        self.transport.get_text(endpoint, &query).await
    }
}

#[async_trait]
impl NetworkDetailsFetcher for FoundationClient {
    async fn fetch_network_details(
        &self,
        nodes: Vec<NodeAddress>,
        timeout: Duration,
    ) -> FoundationResult<Vec<NodeNetworkDetails>> {
        self.node_network_details_array(&nodes, Some(timeout)).await
    }
}

/// The appliance takes whole seconds; partial seconds are rounded up.
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

fn encode<T: Serialize + ?Sized>(value: &T) -> FoundationResult<Value> {
    serde_json::to_value(value).map_err(|e| {
        ValidationError::Format(format!("Failed to encode request body: {}", e)).into()
    })
}

fn decode<T: DeserializeOwned>(value: Value, endpoint: &str) -> FoundationResult<T> {
    serde_json::from_value(value).map_err(|e| {
        FoundationError::InvalidResponse(format!("Unexpected {} response: {}", endpoint, e))
    })
}
