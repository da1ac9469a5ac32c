use crate::core::domain::model::{
    AdvancedOptions, ClusterDescriptor, HypervisorSelection, NodeSpec, OperationFlags,
};
use serde::{Deserialize, Serialize};

/// Everything needed to build an imaging or IPMI configuration payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub cluster: ClusterDescriptor,
    /// Ordered nodes; order drives block grouping and hostname numbering.
    pub nodes: Vec<NodeSpec>,
    /// `None` selects the AHV build bundled with AOS.
    #[serde(default)]
    pub hypervisor: Option<HypervisorSelection>,
    /// Filename of the AOS bundle to use.
    pub aos: String,
    #[serde(default)]
    pub advanced: AdvancedOptions,
    #[serde(default)]
    pub operations: OperationFlags,
}
