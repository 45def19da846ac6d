//! Smoke test: connect to Neo4j via bolt:// and ping through the reader.
//! Run with: cargo test -p lawrisk-graph --test cloud_connect -- --ignored

use lawrisk_graph::{GraphClient, GraphReader, LawGraph};

#[tokio::test]
#[ignore] // requires live Neo4j credentials
async fn cloud_connect() {
    let uri = std::env::var("NEO4J_URI").expect("NEO4J_URI required");
    let user = std::env::var("NEO4J_USER").expect("NEO4J_USER required");
    let password = std::env::var("NEO4J_PASSWORD").expect("NEO4J_PASSWORD required");

    let client = GraphClient::connect(&uri, &user, &password)
        .await
        .expect("Failed to connect");

    let reader = GraphReader::new(client);
    assert!(reader.ping().await.expect("ping failed"));
}
