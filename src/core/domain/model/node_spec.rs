use serde::{Deserialize, Serialize};

/// A physical node to image, as described by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(rename = "ipmiIP")]
    pub ipmi_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_mac: Option<String>,
    /// Defaults to `ADMIN` in the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_username: Option<String>,
    /// Defaults to `ADMIN` in the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_password: Option<String>,
    #[serde(rename = "hypervisorIP")]
    pub hypervisor_ip: String,
    /// SVM IP of the node, also known as the CVM IP.
    #[serde(rename = "svmIP")]
    pub svm_ip: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(rename = "blockID")]
    pub block_id: String,
    #[serde(default)]
    pub model: String,
    /// Only read from the first node of a request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_subnet: Option<String>,
    /// Only read from the first node of a request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_gateway: Option<String>,
}
