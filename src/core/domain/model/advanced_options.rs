use serde::{Deserialize, Serialize};

/// Advanced Foundation parameters. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedOptions {
    /// The number of nodes to form a cluster with. `None` or `0` means every node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_nodes_to_build_cluster_with: Option<usize>,
    /// Configure IPMI before imaging the nodes.
    #[serde(default, rename = "configureIPMI")]
    pub configure_ipmi: bool,
    /// Details when imaging UCS-managed nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucs: Option<UcsCredentials>,
    /// Memory to deploy the CVM with. `None` or `0` uses Foundation's recommendation.
    #[serde(default, rename = "cvmRamInGB", skip_serializing_if = "Option::is_none")]
    pub cvm_ram_in_gb: Option<u32>,
    /// Value to set the cluster redundancy factor to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rf: Option<u8>,
}

/// UCS Manager access used for UCS-managed nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsCredentials {
    #[serde(rename = "ucsmIP")]
    pub ucsm_ip: String,
    pub ucsm_user: String,
    pub ucsm_password: String,
}

impl AdvancedOptions {
    /// Cluster member count for a request of `node_count` nodes.
    pub(crate) fn cluster_member_count(&self, node_count: usize) -> usize {
        match self.number_of_nodes_to_build_cluster_with {
            Some(count) if count > 0 => count,
            _ => node_count,
        }
    }

    /// CVM memory override, with zero treated as unset.
    pub(crate) fn cvm_ram(&self) -> Option<u32> {
        self.cvm_ram_in_gb.filter(|gb| *gb > 0)
    }
}
