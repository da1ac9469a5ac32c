//! Domain models for the `/discover_nodes` endpoint.
//!
//! The appliance groups discovered nodes by block (chassis). Only the fields the
//! client filters on are typed; everything else the appliance reports is kept in
//! `extra` and serialized back unchanged.

use crate::core::domain::model::NodeNetworkDetails;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A discovered block and its nodes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiscoveredBlock {
    /// Block serial number.
    pub block_id: String,
    #[serde(default)]
    pub nodes: Vec<DiscoveredNode>,
    /// Other reported block fields (model, chassis number, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node announced by the discovery protocol, possibly enriched with network details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DiscoveredNode {
    /// True when the node already belongs to a cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configured: Option<bool>,
    /// IPv6 link-local address of the CVM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    /// Only known after enrichment with network details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipmi_ip: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiscoveredBlock {
    /// True when at least one node of the block has the given IPMI IP.
    pub fn has_ipmi_ip(&self, ipmi_ip: &str) -> bool {
        self.nodes.iter().any(|node| node.has_ipmi_ip(ipmi_ip))
    }
}

impl DiscoveredNode {
    pub fn is_configured(&self) -> bool {
        self.configured == Some(true)
    }

    /// Substring match on the node's IPv6 address. A node without an address
    /// never matches.
    pub fn matches_ipv6(&self, ipv6_address: &str) -> bool {
        self.ipv6_address
            .as_deref()
            .is_some_and(|address| address.contains(ipv6_address))
    }

    pub fn has_ipmi_ip(&self, ipmi_ip: &str) -> bool {
        self.ipmi_ip.as_deref() == Some(ipmi_ip)
    }

    /// Deep-merges a network details record into this node. Fields from `details`
    /// win on conflict; merging the same record again is a no-op.
    pub fn merge_details(&mut self, details: &NodeNetworkDetails) -> Result<(), serde_json::Error> {
        let mut merged = serde_json::to_value(&*self)?;
        deep_merge(&mut merged, &serde_json::to_value(details)?);
        *self = serde_json::from_value(merged)?;
        Ok(())
    }
}

/// Recursively merges `source` into `target`: objects key by key, arrays index by
/// index, any other value replaces the target.
pub(crate) fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (idx, value) in source.iter().enumerate() {
                match target.get_mut(idx) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}
