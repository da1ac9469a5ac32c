//! Resolution of the caller's operation flags into the work a single call performs.
//!
//! Imaging and cluster formation are a two-phase workflow: nodes are imaged first,
//! then a second call forms the cluster on the already-imaged nodes.

use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Operations requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationFlags {
    /// Image the nodes. Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_nodes: Option<bool>,
    /// Form the cluster. Nodes are expected to be imaged already. Defaults to false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_cluster: Option<bool>,
}

impl OperationFlags {
    /// Flags for the first phase: image the nodes.
    pub fn image_only() -> Self {
        Self {
            image_nodes: Some(true),
            form_cluster: Some(false),
        }
    }

    /// Flags for the second phase: form the cluster on imaged nodes.
    pub fn form_cluster_only() -> Self {
        Self {
            image_nodes: Some(false),
            form_cluster: Some(true),
        }
    }

    /// Resolves the flags into the single operation this call performs.
    ///
    /// Asking for both phases at once resolves to imaging; the cluster must be
    /// formed by a follow-up call. Asking for neither is rejected.
    pub fn resolve(&self) -> Result<ImagingOperation, ValidationError> {
        match (
            self.image_nodes.unwrap_or(true),
            self.form_cluster.unwrap_or(false),
        ) {
            (true, false) => Ok(ImagingOperation::ImageOnly),
            (false, true) => Ok(ImagingOperation::FormClusterOnly),
            (true, true) => {
                warn!(
                    "image_nodes and form_cluster requested together; imaging now, cluster formation needs a second call"
                );
                Ok(ImagingOperation::ImageOnly)
            }
            (false, false) => Err(ValidationError::ConstraintViolation(
                "Operation flags request neither imaging nor cluster formation".to_string(),
            )),
        }
    }
}

/// The phase a payload drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagingOperation {
    /// Image the nodes; do not initialise the cluster.
    ImageOnly,
    /// Initialise the cluster on nodes imaged by an earlier call.
    FormClusterOnly,
}

impl ImagingOperation {
    /// Per-node `image_now` flag.
    pub fn image_now(self) -> bool {
        matches!(self, ImagingOperation::ImageOnly)
    }

    /// Per-cluster `cluster_init_now` flag.
    pub fn cluster_init_now(self) -> bool {
        matches!(self, ImagingOperation::FormClusterOnly)
    }
}
