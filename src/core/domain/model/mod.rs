mod advanced_options;
mod cluster_descriptor;
mod discovered_block;
mod foundation_config;
mod hypervisor;
mod image_payload;
mod image_request;
mod imaging_operation;
mod log_contents;
mod node_network_details;
mod node_spec;
mod progress_status;

pub use advanced_options::{AdvancedOptions, UcsCredentials};
pub use cluster_descriptor::ClusterDescriptor;
pub use discovered_block::{DiscoveredBlock, DiscoveredNode};
pub use foundation_config::{
    DEFAULT_NETWORK_DETAILS_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, FoundationConfig,
};
pub use hypervisor::{BUNDLED_HYPERVISOR, HypervisorSelection};
pub use image_payload::{ImagePayload, PayloadBlock, PayloadCluster, PayloadNode, PayloadTests};
pub use image_request::ImageRequest;
pub use imaging_operation::{ImagingOperation, OperationFlags};
pub use log_contents::{LogContents, LogType};
pub use node_network_details::{NodeAddress, NodeNetworkDetails};
pub use node_spec::NodeSpec;
pub use progress_status::ProgressStatus;

pub(crate) use node_network_details::{NetworkDetailsRequest, NetworkDetailsResponse};
