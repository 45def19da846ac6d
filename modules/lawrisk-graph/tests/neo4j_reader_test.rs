//! Reader queries against a disposable Neo4j container.
//! Run with: cargo test -p lawrisk-graph --features test-utils --test neo4j_reader_test -- --ignored

#![cfg(feature = "test-utils")]

use std::sync::Arc;

use lawrisk_common::{ArticleScope, Direction, RiskLevel};
use lawrisk_graph::testutil::{neo4j_container, seed_statute};
use lawrisk_graph::{Analyzer, GraphReader, LawGraph};

#[tokio::test]
#[ignore] // requires docker
async fn reader_assembles_seeded_neighborhood() {
    let (_container, client) = neo4j_container().await;
    seed_statute(&client).await;
    let analyzer = Analyzer::new(Arc::new(GraphReader::new(client)));

    let response = analyzer
        .analyze(&ArticleScope::article("산업안전보건법", "38").with_level("법률"))
        .await
        .unwrap();
    assert_eq!(response.articles.len(), 1);

    let bundle = &response.articles[0];
    assert_eq!(bundle.node_id, "ACT-38");
    assert_eq!(bundle.level.as_deref(), Some("법률"));
    assert_eq!(bundle.risk_level, RiskLevel::High);
    assert!(bundle.risk_from_penalties);
    assert_eq!(bundle.hierarchy.len(), 1);
    assert_eq!(bundle.hierarchy[0].direction, Direction::Child);
    assert_eq!(bundle.reference_weak[0].node_id, "ACT-39");
    assert_eq!(bundle.penalties[0].node_id, "ACT-168");
    assert_eq!(bundle.delegation_pattern[0].node_id, "DECREE-38");
    assert_eq!(
        bundle.highlights,
        vec!["사업주는 위험을 예방하기 위하여 필요한 조치를 하여야 한다."]
    );
}

#[tokio::test]
#[ignore] // requires docker
async fn reader_statute_scope_spans_documents_and_empty_match_is_ok() {
    let (_container, client) = neo4j_container().await;
    seed_statute(&client).await;
    let reader = GraphReader::new(client);

    let rows = reader
        .neighborhoods(&ArticleScope::statute("산업안전보건법"))
        .await
        .unwrap();
    let mut ids: Vec<String> = rows.into_iter().map(|r| r.article.node_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids, vec!["ACT-168", "ACT-38", "ACT-39", "ACT-40", "DECREE-38"]);

    let none = reader
        .neighborhoods(&ArticleScope::statute("없는 법"))
        .await
        .unwrap();
    assert!(none.is_empty());

    assert_eq!(reader.articles().await.unwrap().len(), 5);
    assert!(reader.ping().await.unwrap());
}

#[tokio::test]
#[ignore] // requires docker
async fn reader_matches_integer_article_numbers() {
    let (_container, client) = neo4j_container().await;
    seed_statute(&client).await;
    let reader = GraphReader::new(client);

    let rows = reader
        .neighborhoods(&ArticleScope::article("산업안전보건법", "40"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].article.node_id, "ACT-40");
    assert_eq!(rows[0].article.article_no, "40");
}
