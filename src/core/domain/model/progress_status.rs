//! Domain model for the `/progress` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Progress of the current imaging session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProgressStatus {
    /// Overall completion percentage (0.0 to 100.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_percent_complete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// True once imaging has stopped, successfully or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imaging_stopped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_session: Option<bool>,
    /// Per-node progress entries.
    #[serde(default)]
    pub nodes: Vec<Value>,
    /// Per-cluster progress entries.
    #[serde(default)]
    pub clusters: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressStatus {
    /// True when imaging has stopped and everything reached 100%.
    pub fn is_complete(&self) -> bool {
        self.imaging_stopped == Some(true)
            && self
                .aggregate_percent_complete
                .is_some_and(|pct| pct >= 100.0)
    }
}
