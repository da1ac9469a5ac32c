use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request entry for `/node_network_details`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeAddress {
    pub ipv6_address: String,
}

impl NodeAddress {
    pub fn new(ipv6_address: impl Into<String>) -> Self {
        Self {
            ipv6_address: ipv6_address.into(),
        }
    }
}

/// Network configuration the appliance resolved for one node.
///
/// Typed fields are the ones callers usually need; all other keys are preserved
/// in `extra` so they survive the merge into discovered nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NodeNetworkDetails {
    pub ipv6_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvm_ip: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a `/node_network_details` request. The timeout is sent as a string.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NetworkDetailsRequest<'a> {
    pub nodes: &'a [NodeAddress],
    pub timeout: String,
}

/// Body of a `/node_network_details` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NetworkDetailsResponse {
    #[serde(default)]
    pub nodes: Vec<NodeNetworkDetails>,
}
