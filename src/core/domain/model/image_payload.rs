//! The request body posted to the `image_nodes` and `ipmi_config` endpoints.
//!
//! Field names are the appliance's own. `Option` fields either serialize as `null`
//! or are omitted, matching what the appliance expects for each key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete imaging payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagePayload {
    pub hypervisor_netmask: String,
    pub hypervisor_gateway: String,
    pub hypervisor_nameserver: Vec<String>,
    pub rdma_passthrough: bool,
    pub ipmi_configure_now: bool,
    /// Taken from the first node only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_netmask: Option<String>,
    /// Taken from the first node only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_gateway: Option<String>,
    /// AOS bundle filename.
    pub nos_package: String,
    /// Empty for the bundled hypervisor, otherwise `{os: installer filename}`.
    pub hypervisor_iso: BTreeMap<String, String>,
    /// Set to `kvm` only when the bundled hypervisor is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperv_sku: Option<String>,
    pub skip_hypervisor: bool,
    pub cvm_netmask: String,
    pub cvm_gateway: String,
    pub use_foundation_ips: bool,
    pub clusters: Vec<PayloadCluster>,
    pub blocks: Vec<PayloadBlock>,
    pub tests: PayloadTests,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucsm_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucsm_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucsm_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs_master_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs_master_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs_master_password: Option<String>,
}

/// A chassis and the nodes it holds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PayloadBlock {
    pub block_id: String,
    pub model: String,
    pub nodes: Vec<PayloadNode>,
}

/// Per-node imaging settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PayloadNode {
    pub ipmi_ip: String,
    pub ipmi_mac: Option<String>,
    pub ipmi_user: String,
    pub ipmi_password: String,
    pub ipmi_configure_now: bool,
    pub hypervisor: String,
    pub hypervisor_ip: String,
    /// `{cluster}-{n}` when imaging, `null` when only forming the cluster.
    pub hypervisor_hostname: Option<String>,
    pub ipmi_configure_successful: bool,
    pub node_position: String,
    /// `true` for UCS-managed nodes, `null` otherwise.
    pub ucsm_managed_mode: Option<bool>,
    pub ucsm_node_serial: Option<String>,
    /// `true` for Xen, `null` otherwise.
    pub xen_config_type: Option<bool>,
    pub image_successful: bool,
    pub image_now: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvm_gb_ram: Option<u32>,
    pub cvm_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_serial: Option<String>,
}

/// The cluster to create once the nodes are imaged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PayloadCluster {
    pub cluster_init_now: bool,
    pub cluster_name: String,
    pub cluster_external_ip: String,
    /// CVM IPs of the cluster members, in node order.
    pub cluster_members: Vec<String>,
    pub single_node_cluster: bool,
    pub redundancy_factor: Option<u8>,
    pub cvm_dns_servers: Vec<String>,
    pub cvm_ntp_servers: Vec<String>,
    pub hypervisor_ntp_servers: Vec<String>,
}

/// Post-imaging test runs. Both are always disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PayloadTests {
    pub run_diagnostics: bool,
    pub run_ncc: bool,
}
