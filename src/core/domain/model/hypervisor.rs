use serde::{Deserialize, Serialize};

/// Hypervisor identifier Foundation uses for the AHV build bundled with AOS.
pub const BUNDLED_HYPERVISOR: &str = "kvm";

/// A non-bundled hypervisor to install on the nodes.
///
/// Requests carry `Option<HypervisorSelection>`; `None` means the bundled AHV.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HypervisorSelection {
    /// Hypervisor OS key, e.g. `esx`, `hyperv`, `kvm` or `xen`.
    pub os: String,
    /// Hypervisor family. Only `xen` changes the payload.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    /// Hyper-V SKU, only sent when `os` is `hyperv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Filename of the installer ISO already uploaded to the appliance.
    pub filename: String,
}

impl HypervisorSelection {
    pub fn is_hyperv(&self) -> bool {
        self.os == "hyperv"
    }

    pub fn is_xen(&self) -> bool {
        self.hypervisor_type.as_deref() == Some("xen")
    }
}
