use lawrisk_common::{ArticleRecord, Direction, RelationType, RiskLevel};
use lawrisk_graph::{assemble_rows, NeighborRecord, NeighborhoodRow};

fn article(id: &str, risk: Option<&str>) -> ArticleRecord {
    ArticleRecord {
        node_id: id.to_string(),
        law_name: "산업안전보건법".to_string(),
        article_no: id.trim_start_matches("ACT-").to_string(),
        title: format!("title {id}"),
        content: format!("content {id}"),
        risk_level_final: risk.map(str::to_string),
        ..ArticleRecord::default()
    }
}

fn neighbor(id: &str) -> Option<NeighborRecord> {
    Some(NeighborRecord {
        node_id: id.to_string(),
        article_no: id.trim_start_matches("ACT-").to_string(),
        title: format!("title {id}"),
        content: format!("content {id}"),
    })
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(id).collect()
}

#[test]
fn article_without_relations_gets_empty_buckets() {
    let bundles = assemble_rows(vec![NeighborhoodRow {
        article: article("ACT-40", None),
        level: Some("법률".into()),
        ..NeighborhoodRow::default()
    }]);

    assert_eq!(bundles.len(), 1);
    let bundle = &bundles[0];
    assert_eq!(bundle.level.as_deref(), Some("법률"));
    assert_eq!(bundle.risk_level, RiskLevel::None);
    assert!(bundle.related_articles.is_empty());
    assert!(bundle.penalties.is_empty());
    assert!(bundle.hierarchy.is_empty());
    assert!(bundle.reference_weak.is_empty());
    assert!(bundle.delegation_pattern.is_empty());
}

#[test]
fn null_and_id_less_matches_never_reach_a_bucket() {
    let bundles = assemble_rows(vec![NeighborhoodRow {
        article: article("ACT-38", Some("HIGH")),
        penalties: vec![None, neighbor("ACT-168"), Some(NeighborRecord::default())],
        references: vec![None],
        children: vec![None, None],
        ..NeighborhoodRow::default()
    }]);

    let bundle = &bundles[0];
    assert_eq!(ids(&bundle.penalties, |p| p.node_id.clone()), vec!["ACT-168"]);
    assert!(bundle.reference_weak.is_empty());
    assert!(bundle.hierarchy.is_empty());
    assert!(bundle.related_articles.is_empty());
}

#[test]
fn neighbor_reached_twice_appears_once_per_bucket() {
    let bundles = assemble_rows(vec![NeighborhoodRow {
        article: article("ACT-38", Some("HIGH")),
        children: vec![neighbor("ACT-39"), neighbor("ACT-39")],
        references: vec![neighbor("ACT-39"), neighbor("ACT-42"), neighbor("ACT-42")],
        penalties: vec![neighbor("ACT-168"), neighbor("ACT-168")],
        ..NeighborhoodRow::default()
    }]);

    let bundle = &bundles[0];
    assert_eq!(ids(&bundle.hierarchy, |h| h.node_id.clone()), vec!["ACT-39"]);
    assert_eq!(
        ids(&bundle.reference_weak, |r| r.node_id.clone()),
        vec!["ACT-39", "ACT-42"]
    );
    assert_eq!(ids(&bundle.penalties, |p| p.node_id.clone()), vec!["ACT-168"]);

    // merged view: ACT-39 once, tagged with the first relation that reached it
    let related: Vec<(String, RelationType)> = bundle
        .related_articles
        .iter()
        .map(|r| (r.node_id.clone(), r.relation_type))
        .collect();
    assert_eq!(
        related,
        vec![
            ("ACT-39".to_string(), RelationType::Hierarchy),
            ("ACT-42".to_string(), RelationType::ReferenceWeak),
        ]
    );
}

#[test]
fn hierarchy_is_tagged_with_direction_and_parents_stay_out_of_related() {
    let bundles = assemble_rows(vec![NeighborhoodRow {
        article: article("ACT-39", Some("MEDIUM")),
        children: vec![neighbor("ACT-39-2")],
        parents: vec![neighbor("ACT-38")],
        ..NeighborhoodRow::default()
    }]);

    let bundle = &bundles[0];
    let hierarchy: Vec<(String, Direction)> = bundle
        .hierarchy
        .iter()
        .map(|h| (h.node_id.clone(), h.direction))
        .collect();
    assert_eq!(
        hierarchy,
        vec![
            ("ACT-39-2".to_string(), Direction::Child),
            ("ACT-38".to_string(), Direction::Parent),
        ]
    );
    assert_eq!(
        ids(&bundle.related_articles, |r| r.node_id.clone()),
        vec!["ACT-39-2"]
    );
}

#[test]
fn neighbour_that_is_both_child_and_parent_keeps_both_directions() {
    let bundles = assemble_rows(vec![NeighborhoodRow {
        article: article("ACT-38", Some("HIGH")),
        children: vec![neighbor("ACT-39"), neighbor("ACT-39")],
        parents: vec![neighbor("ACT-39")],
        ..NeighborhoodRow::default()
    }]);

    let bundle = &bundles[0];
    let hierarchy: Vec<(String, Direction)> = bundle
        .hierarchy
        .iter()
        .map(|h| (h.node_id.clone(), h.direction))
        .collect();
    assert_eq!(
        hierarchy,
        vec![
            ("ACT-39".to_string(), Direction::Child),
            ("ACT-39".to_string(), Direction::Parent),
        ]
    );
    assert_eq!(
        ids(&bundle.related_articles, |r| r.node_id.clone()),
        vec!["ACT-39"]
    );
}

#[test]
fn rows_for_the_same_article_are_merged_in_first_seen_order() {
    let bundles = assemble_rows(vec![
        NeighborhoodRow {
            article: article("ACT-38", Some("HIGH")),
            penalties: vec![neighbor("ACT-168")],
            ..NeighborhoodRow::default()
        },
        NeighborhoodRow {
            article: article("ACT-39", Some("MEDIUM")),
            ..NeighborhoodRow::default()
        },
        NeighborhoodRow {
            article: article("ACT-38", Some("HIGH")),
            level: Some("법률".into()),
            penalties: vec![neighbor("ACT-169"), neighbor("ACT-168")],
            delegations: vec![neighbor("DECREE-38")],
            ..NeighborhoodRow::default()
        },
    ]);

    assert_eq!(ids(&bundles, |b| b.node_id.clone()), vec!["ACT-38", "ACT-39"]);
    let merged = &bundles[0];
    assert_eq!(merged.level.as_deref(), Some("법률"));
    assert_eq!(
        ids(&merged.penalties, |p| p.node_id.clone()),
        vec!["ACT-168", "ACT-169"]
    );
    assert_eq!(
        ids(&merged.delegation_pattern, |d| d.node_id.clone()),
        vec!["DECREE-38"]
    );
}

#[test]
fn no_rows_means_no_bundles() {
    assert!(assemble_rows(Vec::new()).is_empty());
}
