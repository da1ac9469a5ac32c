use foundation_client::{
    DiscoveryFilters, FetchExtra, FixtureTransport, FoundationClient, FoundationResult,
};
use std::{env, sync::Arc};

/// Usage: `discover [FOUNDATION_IP | FIXTURE_DIR]`
///
/// A directory argument answers every request from fixture files, anything else
/// is used as the Foundation VM address (defaults to `$FOUNDATION_IP`).
#[tokio::main]
async fn main() -> FoundationResult<()> {
    let target = env::args()
        .nth(1)
        .or_else(|| env::var("FOUNDATION_IP").ok())
        .unwrap_or_else(|| "demos/fixtures".to_string());

    let client = if std::path::Path::new(&target).is_dir() {
        let fixtures = FixtureTransport::from_dir(&target).await?;
        FoundationClient::builder()
            .fixtures(Arc::new(fixtures))
            .build()?
    } else {
        FoundationClient::builder().host(target)?.build()?
    };

    println!("Foundation version: {}", client.version().await);

    let fetch = FetchExtra {
        fetch_network_info: Some(true),
    };
    let blocks = client
        .discover_nodes(DiscoveryFilters::default(), fetch)
        .await?;

    for block in &blocks {
        println!("Block {}", block.block_id);
        for node in &block.nodes {
            println!(
                "  {} ipmi={}",
                node.ipv6_address.as_deref().unwrap_or("-"),
                node.ipmi_ip.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
