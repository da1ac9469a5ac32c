use serde::{Deserialize, Serialize};

/// Which log a [`LogContents`] was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Node,
    Cluster,
}

/// Imaging or cluster-formation log of one node or cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogContents {
    /// Hypervisor IP for node logs, CVM IP for cluster logs.
    pub ip: String,
    #[serde(rename = "logContents")]
    pub log_contents: String,
    #[serde(rename = "type")]
    pub log_type: LogType,
}
