//! Cluster-wide parameters supplied by the caller when imaging nodes.

use serde::{Deserialize, Serialize};

/// Describes the cluster the imaged nodes will form.
///
/// Field names on the wire follow the camelCase shape used by Foundation front-ends,
/// so descriptors can be loaded straight from their JSON exports.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDescriptor {
    /// Cluster name; also the prefix of generated hypervisor hostnames.
    pub name: String,
    /// Cluster virtual IP.
    #[serde(rename = "externalIP")]
    pub external_ip: String,
    /// Default gateway for hypervisors and CVMs.
    pub gateway: String,
    /// Netmask for hypervisors and CVMs.
    pub subnet: String,
    /// NTP servers. When absent the nameservers are used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntp_server: Option<Vec<String>>,
    /// DNS servers.
    #[serde(default)]
    pub nameserver: Vec<String>,
    /// Pass RDMA NICs through to the CVM.
    #[serde(default)]
    pub rdma_enabled: bool,
    /// Redundancy factor used when the advanced options do not override it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redundancy_factor: Option<u8>,
    /// XenServer pool master username, only read for Xen imaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs_master_username: Option<String>,
    /// XenServer pool master password, only read for Xen imaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs_master_password: Option<String>,
}

impl ClusterDescriptor {
    /// Servers used for CVM and hypervisor time sync: NTP when given, nameservers otherwise.
    pub fn time_servers(&self) -> &[String] {
        self.ntp_server.as_deref().unwrap_or(&self.nameserver)
    }
}
