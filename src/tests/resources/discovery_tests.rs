use crate::{
    DiscoveryFilters, FetchExtra, FoundationClient, FoundationError, ValidationError,
    tests::fixtures::{
        BLOCK_1, BLOCK_2, discover_nodes_raw, discovery_transport, fixture_client,
        node_network_details,
    },
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

/// Raw discovery data with the configured node removed.
fn discover_nodes_default_settings() -> Value {
    let mut raw = discover_nodes_raw();
    raw[0]["nodes"]
        .as_array_mut()
        .unwrap()
        .retain(|node| node["configured"] == false);
    raw
}

fn with_network_info(mut node: Value, ipv6_address: &str) -> Value {
    let details = node_network_details()["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["ipv6_address"] == ipv6_address)
        .cloned()
        .unwrap();
    for (key, value) in details.as_object().unwrap() {
        node[key] = value.clone();
    }
    node
}

#[tokio::test]
async fn test_discover_nodes_using_defaults() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());

    let discovered = client
        .discover_nodes(DiscoveryFilters::default(), FetchExtra::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&discovered).unwrap(),
        discover_nodes_default_settings()
    );
    assert_eq!(transport.request_count("node_network_details").await, 0);
}

#[tokio::test]
async fn test_discover_nodes_including_configured() {
    let client = fixture_client(discovery_transport());
    let filters = DiscoveryFilters {
        include_configured: true,
        ..Default::default()
    };

    let discovered = client
        .discover_nodes(filters, FetchExtra::default())
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&discovered).unwrap(), discover_nodes_raw());
}

#[tokio::test]
async fn test_discover_nodes_fetching_network_details() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());
    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };

    let discovered = client
        .discover_nodes(DiscoveryFilters::default(), fetch)
        .await
        .unwrap();

    let mut expected = discover_nodes_default_settings();
    for block in expected.as_array_mut().unwrap() {
        for node in block["nodes"].as_array_mut().unwrap() {
            let ipv6 = node["ipv6_address"].as_str().unwrap().to_string();
            *node = with_network_info(node.clone(), &ipv6);
        }
    }
    assert_eq!(serde_json::to_value(&discovered).unwrap(), expected);

    let requests = transport.requests().await;
    let details_request = requests
        .iter()
        .find(|r| r.path == "node_network_details")
        .unwrap();
    assert_eq!(
        details_request.body,
        Some(json!({
            "nodes": [
                {"ipv6_address": "fe80::20c:29ff:fe64:d8a2"},
                {"ipv6_address": "fe80::20c:29ff:fe64:d8c4"},
                {"ipv6_address": "fe80::20c:29ff:fe11:aa01"}
            ],
            "timeout": "45"
        }))
    );
}

#[tokio::test]
async fn test_discover_node_filtering_by_bmc_ip() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());
    let filters = DiscoveryFilters {
        ipmi_ip: Some("10.38.43.33".to_string()),
        ..Default::default()
    };

    let discovered = client
        .discover_nodes(filters, FetchExtra::default())
        .await
        .unwrap();

    let raw = discover_nodes_raw();
    let mut expected_block = raw[0].clone();
    expected_block["nodes"] = json!([with_network_info(
        raw[0]["nodes"][2].clone(),
        "fe80::20c:29ff:fe64:d8c4"
    )]);
    assert_eq!(serde_json::to_value(&discovered).unwrap(), json!([expected_block]));
    assert_eq!(transport.request_count("node_network_details").await, 1);
}

#[tokio::test]
async fn test_discover_node_network_details_filtering_by_ipv6_address() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());
    let filters = DiscoveryFilters {
        ipv6_address: Some("fe80::20c:29ff:fe64:d8a2".to_string()),
        ..Default::default()
    };
    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };

    let discovered = client.discover_nodes(filters, fetch).await.unwrap();

    assert_eq!(discovered.len(), 2);
    assert_eq!(discovered[0].block_id, BLOCK_1);
    assert_eq!(discovered[0].nodes.len(), 1);
    assert_eq!(discovered[0].nodes[0].ipmi_ip.as_deref(), Some("10.38.43.31"));
    assert_eq!(discovered[1].block_id, BLOCK_2);
    assert!(discovered[1].nodes.is_empty());

    let requests = transport.requests().await;
    let body = requests
        .iter()
        .find(|r| r.path == "node_network_details")
        .and_then(|r| r.body.clone())
        .unwrap();
    assert_eq!(body["nodes"], json!([{"ipv6_address": "fe80::20c:29ff:fe64:d8a2"}]));
}

#[tokio::test]
async fn test_discover_unknown_block_skips_network_details() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());
    let filters = DiscoveryFilters {
        block_sn: Some("BSN1".to_string()),
        ..Default::default()
    };
    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };

    let discovered = client.discover_nodes(filters, fetch).await.unwrap();

    assert!(discovered.is_empty());
    assert_eq!(transport.request_count("discover_nodes").await, 1);
    assert_eq!(transport.request_count("node_network_details").await, 0);
}

#[tokio::test]
async fn test_discover_rejects_configured_with_network_info() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());
    let filters = DiscoveryFilters {
        include_configured: true,
        ..Default::default()
    };
    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };

    let result = client.discover_nodes(filters, fetch).await;

    assert!(matches!(
        result,
        Err(FoundationError::Validation(
            ValidationError::InvalidOptionCombination { .. }
        ))
    ));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_discover_over_http() {
    let mock_server = MockServer::start().await;
    let client = FoundationClient::builder()
        .base_url(&format!("{}/foundation/", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/foundation/discover_nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discover_nodes_raw()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/foundation/node_network_details"))
        .and(body_json(json!({
            "nodes": [{"ipv6_address": "fe80::20c:29ff:fe11:aa01"}],
            "timeout": "45"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_network_details()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filters = DiscoveryFilters {
        block_sn: Some(BLOCK_2.to_string()),
        ..Default::default()
    };
    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };
    let discovered = client.discover_nodes(filters, fetch).await.unwrap();

    assert_eq!(discovered.len(), 1);
    assert_eq!(discovered[0].nodes[0].ipmi_ip.as_deref(), Some("10.38.43.34"));
    assert_eq!(discovered[0].nodes[0].extra["cvm_ip"], "10.38.43.54");
}

#[tokio::test]
async fn test_discover_transport_error_is_propagated() {
    let mock_server = MockServer::start().await;
    let client = FoundationClient::builder()
        .base_url(&format!("{}/foundation/", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/foundation/discover_nodes"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .discover_nodes(DiscoveryFilters::default(), FetchExtra::default())
        .await;
    assert!(matches!(result, Err(FoundationError::Api { status: 503, .. })));
}

#[tokio::test]
async fn test_node_network_details_single_address() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());

    let details = client
        .node_network_details("fe80::20c:29ff:fe64:d8a2", Some(std::time::Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(details.len(), 3);
    let body = transport.requests().await[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({"nodes": [{"ipv6_address": "fe80::20c:29ff:fe64:d8a2"}], "timeout": "10"})
    );
}

#[tokio::test]
async fn test_node_network_details_rounds_timeout_up() {
    let transport = discovery_transport();
    let client = fixture_client(transport.clone());

    client
        .node_network_details("fe80::20c:29ff:fe64:d8a2", Some(std::time::Duration::from_millis(900)))
        .await
        .unwrap();
    client
        .node_network_details("fe80::20c:29ff:fe64:d8a2", Some(std::time::Duration::from_millis(1500)))
        .await
        .unwrap();

    let timeouts: Vec<Value> = transport
        .requests()
        .await
        .into_iter()
        .filter_map(|r| r.body.map(|body| body["timeout"].clone()))
        .collect();
    assert_eq!(timeouts, [json!("1"), json!("2")]);
}
