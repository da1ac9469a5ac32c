//! Builds the JSON body for the `image_nodes` and `ipmi_config` endpoints.

use crate::core::domain::{
    error::{FoundationResult, ValidationError},
    model::{
        AdvancedOptions, BUNDLED_HYPERVISOR, ClusterDescriptor, HypervisorSelection,
        ImagePayload, ImageRequest, ImagingOperation, NodeSpec, OperationFlags, PayloadBlock,
        PayloadCluster, PayloadNode, PayloadTests,
    },
};
use std::collections::BTreeMap;

const DEFAULT_IPMI_CREDENTIAL: &str = "ADMIN";
const DEFAULT_XS_MASTER_USERNAME: &str = "root";
const DEFAULT_XS_MASTER_PASSWORD: &str = "nutanix/4u";

/// Converts a cluster description and an ordered node list into an [`ImagePayload`].
///
/// The builder is stateless; every call produces a fresh payload and has no side effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadBuilder;

impl PayloadBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the payload for a bundled [`ImageRequest`].
    pub fn build_request(&self, request: &ImageRequest) -> FoundationResult<ImagePayload> {
        self.build(
            &request.cluster,
            &request.nodes,
            request.hypervisor.as_ref(),
            &request.aos,
            &request.advanced,
            &request.operations,
        )
    }

    /// Builds the imaging payload.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `nodes` is empty or if `operations` asks for
    /// neither imaging nor cluster formation.
    pub fn build(
        &self,
        cluster: &ClusterDescriptor,
        nodes: &[NodeSpec],
        hypervisor: Option<&HypervisorSelection>,
        aos: &str,
        advanced: &AdvancedOptions,
        operations: &OperationFlags,
    ) -> FoundationResult<ImagePayload> {
        let first = nodes.first().ok_or_else(|| ValidationError::Field {
            field: "nodes".to_string(),
            message: "At least one node is required".to_string(),
        })?;
        let operation = operations.resolve()?;

        let cluster_members: Vec<String> = nodes
            .iter()
            .take(advanced.cluster_member_count(nodes.len()))
            .map(|node| node.svm_ip.clone())
            .collect();

        let blocks = self.build_blocks(cluster, nodes, hypervisor, advanced, operation);

        let hypervisor_iso: BTreeMap<String, String> = hypervisor
            .map(|hv| (hv.os.clone(), hv.filename.clone()))
            .into_iter()
            .collect();

        let time_servers = cluster.time_servers().to_vec();
        let payload_cluster = PayloadCluster {
            cluster_init_now: operation.cluster_init_now(),
            cluster_name: cluster.name.clone(),
            cluster_external_ip: cluster.external_ip.clone(),
            single_node_cluster: cluster_members.len() == 1,
            cluster_members,
            redundancy_factor: advanced
                .rf
                .filter(|rf| *rf > 0)
                .or(cluster.redundancy_factor),
            cvm_dns_servers: cluster.nameserver.clone(),
            cvm_ntp_servers: time_servers.clone(),
            hypervisor_ntp_servers: time_servers,
        };

        let mut payload = ImagePayload {
            hypervisor_netmask: cluster.subnet.clone(),
            hypervisor_gateway: cluster.gateway.clone(),
            hypervisor_nameserver: cluster.nameserver.clone(),
            rdma_passthrough: cluster.rdma_enabled,
            ipmi_configure_now: advanced.configure_ipmi,
            ipmi_netmask: first.ipmi_subnet.clone(),
            ipmi_gateway: first.ipmi_gateway.clone(),
            nos_package: aos.to_string(),
            hypervisor_iso,
            hypervisor: hypervisor
                .is_none()
                .then(|| BUNDLED_HYPERVISOR.to_string()),
            hyperv_sku: hypervisor
                .filter(|hv| hv.is_hyperv())
                .and_then(|hv| hv.sku.clone()),
            skip_hypervisor: false,
            cvm_netmask: cluster.subnet.clone(),
            cvm_gateway: cluster.gateway.clone(),
            use_foundation_ips: false,
            clusters: vec![payload_cluster],
            blocks,
            tests: PayloadTests::default(),
            ucsm_ip: None,
            ucsm_user: None,
            ucsm_password: None,
            xs_master_ip: None,
            xs_master_username: None,
            xs_master_password: None,
        };

        if let Some(ucs) = &advanced.ucs {
            payload.ucsm_ip = Some(ucs.ucsm_ip.clone());
            payload.ucsm_user = Some(ucs.ucsm_user.clone());
            payload.ucsm_password = Some(ucs.ucsm_password.clone());
        }

        if hypervisor.is_some_and(HypervisorSelection::is_xen) {
            payload.xs_master_ip = Some(first.hypervisor_ip.clone());
            payload.xs_master_username = Some(
                cluster
                    .xs_master_username
                    .clone()
                    .unwrap_or_else(|| DEFAULT_XS_MASTER_USERNAME.to_string()),
            );
            payload.xs_master_password = Some(
                cluster
                    .xs_master_password
                    .clone()
                    .unwrap_or_else(|| DEFAULT_XS_MASTER_PASSWORD.to_string()),
            );
        }

        Ok(payload)
    }

    /// Groups nodes into blocks. A new block starts whenever the block id differs
    /// from the previous node's, so equal ids that are not adjacent stay separate.
    fn build_blocks(
        &self,
        cluster: &ClusterDescriptor,
        nodes: &[NodeSpec],
        hypervisor: Option<&HypervisorSelection>,
        advanced: &AdvancedOptions,
        operation: ImagingOperation,
    ) -> Vec<PayloadBlock> {
        let mut blocks: Vec<PayloadBlock> = Vec::new();

        for (idx, node) in nodes.iter().enumerate() {
            let entry = self.build_node(cluster, node, idx, hypervisor, advanced, operation);
            match blocks.last_mut() {
                Some(block) if block.block_id == node.block_id => block.nodes.push(entry),
                _ => blocks.push(PayloadBlock {
                    block_id: node.block_id.clone(),
                    model: node.model.clone(),
                    nodes: vec![entry],
                }),
            }
        }

        blocks
    }

    fn build_node(
        &self,
        cluster: &ClusterDescriptor,
        node: &NodeSpec,
        idx: usize,
        hypervisor: Option<&HypervisorSelection>,
        advanced: &AdvancedOptions,
        operation: ImagingOperation,
    ) -> PayloadNode {
        PayloadNode {
            ipmi_ip: node.ipmi_ip.clone(),
            ipmi_mac: node.ipmi_mac.clone(),
            ipmi_user: credential_or_default(node.ipmi_username.as_deref()),
            ipmi_password: credential_or_default(node.ipmi_password.as_deref()),
            ipmi_configure_now: advanced.configure_ipmi,
            hypervisor: hypervisor
                .map(|hv| hv.os.clone())
                .unwrap_or_else(|| BUNDLED_HYPERVISOR.to_string()),
            hypervisor_ip: node.hypervisor_ip.clone(),
            hypervisor_hostname: operation
                .image_now()
                .then(|| format!("{}-{}", cluster.name, idx + 1)),
            ipmi_configure_successful: true,
            node_position: node.position.clone(),
            ucsm_managed_mode: advanced.ucs.is_some().then_some(true),
            ucsm_node_serial: node.serial.clone(),
            xen_config_type: hypervisor
                .is_some_and(HypervisorSelection::is_xen)
                .then_some(true),
            image_successful: false,
            image_now: operation.image_now(),
            cvm_gb_ram: advanced.cvm_ram(),
            cvm_ip: node.svm_ip.clone(),
            node_serial: node.serial.clone(),
        }
    }
}

/// Empty or missing IPMI credentials fall back to the BMC factory default.
fn credential_or_default(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_IPMI_CREDENTIAL)
        .to_string()
}
