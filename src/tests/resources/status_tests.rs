use crate::{
    FixtureTransport, FoundationClient, FoundationError, LogType, UNKNOWN_VERSION,
    ValidationError, tests::fixtures::fixture_client,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

fn status_transport() -> Arc<FixtureTransport> {
    Arc::new(
        FixtureTransport::new()
            .on_get(
                "progress",
                json!({
                    "aggregate_percent_complete": 64.5,
                    "session_id": "20240501-101500-7",
                    "imaging_stopped": false,
                    "abort_session": false,
                    "nodes": [{"hypervisor_ip": "10.38.43.41", "percent_complete": 70}],
                    "clusters": [{"cluster_name": "poc", "percent_complete": 50}],
                    "action": "image"
                }),
            )
            .on_get_text("node_log", "20240501 10:15:00 INFO Imaging started")
            .on_get_text("cluster_log", "20240501 11:02:13 INFO Cluster created")
            .on_get_text("version", "5.4.2\n")
            .on_post("provision_network", json!({"status": "provisioned"})),
    )
}

#[tokio::test]
async fn test_progress() {
    let client = fixture_client(status_transport());

    let progress = client.progress().await.unwrap();

    assert_eq!(progress.aggregate_percent_complete, Some(64.5));
    assert_eq!(progress.session_id.as_deref(), Some("20240501-101500-7"));
    assert_eq!(progress.nodes.len(), 1);
    assert_eq!(progress.clusters[0]["cluster_name"], "poc");
    assert_eq!(progress.extra["action"], "image");
    assert!(!progress.is_complete());
}

#[tokio::test]
async fn test_progress_unexpected_shape() {
    let transport = Arc::new(FixtureTransport::new().on_get("progress", json!([1, 2, 3])));
    let client = fixture_client(transport);

    let result = client.progress().await;
    assert!(matches!(result, Err(FoundationError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_node_log() {
    let transport = status_transport();
    let client = fixture_client(transport.clone());

    let log = client.node_log("10.38.43.41", None).await.unwrap();

    assert_eq!(log.ip, "10.38.43.41");
    assert_eq!(log.log_type, LogType::Node);
    assert_eq!(log.log_contents, "20240501 10:15:00 INFO Imaging started");
    assert_eq!(
        serde_json::to_value(&log).unwrap(),
        json!({
            "ip": "10.38.43.41",
            "logContents": "20240501 10:15:00 INFO Imaging started",
            "type": "node"
        })
    );

    let requests = transport.requests().await;
    assert_eq!(
        requests[0].query,
        vec![("hypervisor_ip".to_string(), "10.38.43.41".to_string())]
    );
}

#[tokio::test]
async fn test_cluster_log_with_session() {
    let transport = status_transport();
    let client = fixture_client(transport.clone());

    let log = client
        .cluster_log("10.38.43.51", Some("20240501-101500-7"))
        .await
        .unwrap();

    assert_eq!(log.log_type, LogType::Cluster);
    assert_eq!(log.log_contents, "20240501 11:02:13 INFO Cluster created");

    let requests = transport.requests().await;
    assert_eq!(requests[0].path, "cluster_log");
    assert_eq!(
        requests[0].query,
        vec![
            ("cvm_ip".to_string(), "10.38.43.51".to_string()),
            ("session_id".to_string(), "20240501-101500-7".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_node_log_over_http() {
    let mock_server = MockServer::start().await;
    let client = FoundationClient::builder()
        .base_url(&format!("{}/foundation", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/foundation/node_log"))
        .and(query_param("hypervisor_ip", "10.38.43.41"))
        .and(query_param("session_id", "s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text log"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let log = client.node_log("10.38.43.41", Some("s-1")).await.unwrap();
    assert_eq!(log.log_contents, "plain text log");
}

#[tokio::test]
async fn test_version_is_cached() {
    let transport = status_transport();
    let client = fixture_client(transport.clone());

    assert_eq!(client.version().await, "5.4.2");
    assert_eq!(client.version().await, "5.4.2");
    assert_eq!(transport.request_count("version").await, 1);
}

#[tokio::test]
async fn test_version_unknown_on_failure() {
    let transport = Arc::new(FixtureTransport::new());
    let client = fixture_client(transport.clone());

    assert_eq!(client.version().await, UNKNOWN_VERSION);
    assert_eq!(client.version().await, UNKNOWN_VERSION);
    assert_eq!(transport.request_count("version").await, 1);
}

#[tokio::test]
async fn test_provision_network() {
    let transport = status_transport();
    let client = fixture_client(transport.clone());
    let nodes = vec![json!({
        "ipv6_address": "fe80::20c:29ff:fe64:d8a2",
        "hypervisor_ip": "10.38.43.41",
        "cvm_ip": "10.38.43.51"
    })];

    let response = client.provision_network(&nodes).await.unwrap();

    assert_eq!(response, json!({"status": "provisioned"}));
    let requests = transport.requests().await;
    assert_eq!(requests[0].body, Some(json!({"nodes": nodes})));
}

#[tokio::test]
async fn test_provision_network_over_http() {
    let mock_server = MockServer::start().await;
    let client = FoundationClient::builder()
        .base_url(&format!("{}/foundation/", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/foundation/provision_network"))
        .and(body_json(json!({"nodes": [{"cvm_ip": "10.38.43.51"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .provision_network(&[json!({"cvm_ip": "10.38.43.51"})])
        .await
        .unwrap();
    assert_eq!(response, json!({}));
}

#[test]
fn test_builder_requires_host() {
    let result = FoundationClient::builder().build();
    assert!(matches!(
        result,
        Err(FoundationError::Validation(ValidationError::Field { ref field, .. })) if field == "host"
    ));
}

#[test]
fn test_builder_rejects_invalid_host() {
    assert!(FoundationClient::builder().host("not a host!").is_err());
    assert!(FoundationClient::builder().port(0).is_err());
}

#[test]
fn test_builder_configures_timeouts() {
    let client = FoundationClient::builder()
        .host("10.38.43.50")
        .unwrap()
        .timeout(std::time::Duration::from_secs(5))
        .network_details_timeout(std::time::Duration::from_secs(20))
        .build()
        .unwrap();

    assert_eq!(client.config().request_timeout.as_secs(), 5);
    assert_eq!(client.config().network_details_timeout.as_secs(), 20);
}
