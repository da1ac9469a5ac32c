use crate::{
    AdvancedOptions, ClusterDescriptor, FixtureMethod, FixtureTransport, FoundationClient,
    FoundationError, HypervisorSelection, ImageRequest, NodeSpec, OperationFlags,
    tests::fixtures::fixture_client,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

fn image_request() -> ImageRequest {
    let nodes = (1..=3u8)
        .map(|n| NodeSpec {
            ipmi_ip: format!("10.38.43.{}", 30 + n),
            hypervisor_ip: format!("10.38.43.{}", 40 + n),
            svm_ip: format!("10.38.43.{}", 50 + n),
            position: ["A", "B", "C"][n as usize - 1].to_string(),
            serial: Some(format!("ZM18SN0{}", n)),
            block_id: "18SM6F450123".to_string(),
            model: "NX-3060-G6".to_string(),
            ipmi_subnet: Some("255.255.255.0".to_string()),
            ipmi_gateway: Some("10.38.43.1".to_string()),
            ..Default::default()
        })
        .collect();

    ImageRequest {
        cluster: ClusterDescriptor {
            name: "poc".to_string(),
            external_ip: "10.38.43.60".to_string(),
            gateway: "10.38.43.1".to_string(),
            subnet: "255.255.255.0".to_string(),
            ntp_server: Some(vec!["0.pool.ntp.org".to_string()]),
            nameserver: vec!["10.38.43.2".to_string()],
            ..Default::default()
        },
        nodes,
        hypervisor: None,
        aos: "nutanix_installer_package-release-6.5.tar.gz".to_string(),
        advanced: AdvancedOptions::default(),
        operations: OperationFlags::default(),
    }
}

fn imaging_transport() -> Arc<FixtureTransport> {
    Arc::new(
        FixtureTransport::new()
            .on_post("image_nodes", json!({"session_id": "20240501-101500-7"}))
            .on_post("ipmi_config", json!({"blocks": []})),
    )
}

#[tokio::test]
async fn test_image_nodes_posts_payload() {
    let transport = imaging_transport();
    let client = fixture_client(transport.clone());
    let request = image_request();

    let response = client.image_nodes(&request).await.unwrap();
    assert_eq!(response["session_id"], "20240501-101500-7");

    let requests = transport.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, FixtureMethod::Post);
    assert_eq!(requests[0].path, "image_nodes");

    let expected = serde_json::to_value(client.generate_image_node_payload(&request).unwrap()).unwrap();
    assert_eq!(requests[0].body.as_ref(), Some(&expected));
}

#[tokio::test]
async fn test_image_nodes_configures_ipmi_first() {
    let transport = imaging_transport();
    let client = fixture_client(transport.clone());
    let mut request = image_request();
    request.advanced.configure_ipmi = true;

    client.image_nodes(&request).await.unwrap();

    let paths: Vec<String> = transport
        .requests()
        .await
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, ["ipmi_config", "image_nodes"]);
}

#[tokio::test]
async fn test_image_nodes_stops_when_ipmi_config_fails() {
    let transport = Arc::new(FixtureTransport::new().on_post("image_nodes", json!({})));
    let client = fixture_client(transport.clone());
    let mut request = image_request();
    request.advanced.configure_ipmi = true;

    let result = client.image_nodes(&request).await;

    assert!(matches!(result, Err(FoundationError::Api { status: 404, .. })));
    assert_eq!(transport.request_count("image_nodes").await, 0);
}

#[tokio::test]
async fn test_image_nodes_without_nodes_sends_nothing() {
    let transport = imaging_transport();
    let client = fixture_client(transport.clone());
    let mut request = image_request();
    request.nodes.clear();

    let result = client.image_nodes(&request).await;

    assert!(matches!(result, Err(FoundationError::Validation(_))));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_ipmi_config_over_http() {
    let mock_server = MockServer::start().await;
    let client = FoundationClient::builder()
        .base_url(&format!("{}/foundation/", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    let mut request = image_request();
    request.advanced.configure_ipmi = true;
    request.hypervisor = Some(HypervisorSelection {
        os: "esx".to_string(),
        hypervisor_type: Some("esx".to_string()),
        sku: None,
        filename: "VMware-VMvisor-Installer-7.0.iso".to_string(),
    });

    Mock::given(method("POST"))
        .and(path("/foundation/ipmi_config"))
        .and(body_partial_json(json!({
            "ipmi_configure_now": true,
            "ipmi_netmask": "255.255.255.0",
            "ipmi_gateway": "10.38.43.1",
            "hypervisor_iso": {"esx": "VMware-VMvisor-Installer-7.0.iso"},
            "clusters": [{
                "cluster_name": "poc",
                "cluster_members": ["10.38.43.51", "10.38.43.52", "10.38.43.53"],
                "cvm_ntp_servers": ["0.pool.ntp.org"]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.ipmi_config(&request).await.unwrap();
    assert_eq!(response, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_form_cluster_phase_payload() {
    let client = fixture_client(imaging_transport());
    let mut request = image_request();
    request.operations = OperationFlags::form_cluster_only();

    let payload = client.generate_image_node_payload(&request).unwrap();
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["clusters"][0]["cluster_init_now"], true);
    assert_eq!(value["blocks"][0]["nodes"][0]["image_now"], false);
    assert_eq!(value["blocks"][0]["nodes"][0]["hypervisor_hostname"], serde_json::Value::Null);
    assert_eq!(value["hypervisor"], "kvm");
}
