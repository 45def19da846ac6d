//! In-memory [`LawGraph`] over a JSON export of the legal graph:
//!
//! ```json
//! {
//!   "nodes": [{"node_id": "...", "node_type": "DOC" | "ARTICLE", ...}],
//!   "edges": [{"source": "...", "target": "...", "type": "CONTAINS"}]
//! }
//! ```
//!
//! Article titles may live under `metadata.title`. Edges pointing at ids
//! that are not in `nodes` resolve to null neighbours, exactly like an
//! optional match that found nothing.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use lawrisk_common::wire::nullable_string;
use lawrisk_common::{ArticleRecord, ArticleScope, RelationType};

use crate::error::GraphError;
use crate::port::{LawGraph, NeighborRecord, NeighborhoodRow};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    nodes: Vec<SnapshotNode>,
    #[serde(default)]
    edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Deserialize)]
struct SnapshotNode {
    #[serde(default, deserialize_with = "nullable_string")]
    node_type: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    metadata: Option<NodeMetadata>,
    #[serde(flatten)]
    article: ArticleRecord,
}

#[derive(Debug, Default, Deserialize)]
struct NodeMetadata {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEdge {
    #[serde(alias = "from", alias = "src")]
    source: String,
    #[serde(alias = "to", alias = "dst")]
    target: String,
    #[serde(rename = "type", alias = "edge_type", alias = "relation")]
    kind: String,
}

#[derive(Debug, Clone)]
struct DocNode {
    law_name: String,
    level: Option<String>,
}

/// Loaded graph, indexed by node id and by edge endpoint.
#[derive(Debug, Default)]
pub struct SnapshotGraph {
    articles: Vec<ArticleRecord>,
    article_index: HashMap<String, usize>,
    docs: Vec<(String, DocNode)>,
    outgoing: HashMap<String, Vec<(RelationType, String)>>,
    incoming: HashMap<String, Vec<(RelationType, String)>>,
}

impl SnapshotGraph {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        let mut graph = SnapshotGraph::default();

        for node in file.nodes {
            let node_id = node.article.node_id.clone();
            if node_id.is_empty() {
                continue;
            }
            match node.node_type.as_str() {
                "ARTICLE" => {
                    let mut article = node.article;
                    if article.title.is_empty() {
                        if let Some(title) = node.metadata.and_then(|m| m.title) {
                            article.title = title;
                        }
                    }
                    graph.article_index.insert(node_id, graph.articles.len());
                    graph.articles.push(article);
                }
                "DOC" => graph.docs.push((
                    node_id,
                    DocNode {
                        law_name: node.article.law_name,
                        level: node.level,
                    },
                )),
                _ => {}
            }
        }

        let mut skipped = 0usize;
        for edge in file.edges {
            let Some(kind) = RelationType::parse(&edge.kind) else {
                skipped += 1;
                continue;
            };
            graph
                .outgoing
                .entry(edge.source.clone())
                .or_default()
                .push((kind, edge.target.clone()));
            graph
                .incoming
                .entry(edge.target)
                .or_default()
                .push((kind, edge.source));
        }

        info!(
            articles = graph.articles.len(),
            documents = graph.docs.len(),
            skipped_edges = skipped,
            "Graph snapshot loaded"
        );
        Ok(graph)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    fn article(&self, node_id: &str) -> Option<&ArticleRecord> {
        self.article_index.get(node_id).map(|&i| &self.articles[i])
    }

    fn neighbor(&self, node_id: &str) -> Option<NeighborRecord> {
        self.article(node_id).map(NeighborRecord::from)
    }

    fn linked<'a>(
        &'a self,
        edges: &'a HashMap<String, Vec<(RelationType, String)>>,
        node_id: &str,
        kind: RelationType,
    ) -> impl Iterator<Item = &'a str> + 'a {
        edges
            .get(node_id)
            .into_iter()
            .flatten()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, other)| other.as_str())
    }

    fn row_for(&self, article: &ArticleRecord, level: Option<String>) -> NeighborhoodRow {
        let id = article.node_id.as_str();
        let out = |kind: RelationType| -> Vec<Option<NeighborRecord>> {
            self.linked(&self.outgoing, id, kind)
                .map(|n| self.neighbor(n))
                .collect()
        };
        NeighborhoodRow {
            article: article.clone(),
            level,
            children: out(RelationType::Hierarchy),
            parents: self
                .linked(&self.incoming, id, RelationType::Hierarchy)
                .map(|n| self.neighbor(n))
                .collect(),
            references: out(RelationType::ReferenceWeak),
            delegations: out(RelationType::DelegationPattern),
            penalties: out(RelationType::PenaltyLink),
        }
    }
}

#[async_trait]
impl LawGraph for SnapshotGraph {
    async fn neighborhoods(&self, scope: &ArticleScope) -> Result<Vec<NeighborhoodRow>, GraphError> {
        let mut rows = Vec::new();
        let docs = self.docs.iter().filter(|(_, doc)| {
            doc.law_name == scope.law_name
                && scope.level.as_ref().map_or(true, |l| doc.level.as_ref() == Some(l))
        });

        for (doc_id, doc) in docs {
            for article_id in self.linked(&self.outgoing, doc_id, RelationType::Contains) {
                let Some(article) = self.article(article_id) else {
                    continue;
                };
                if scope
                    .article_no
                    .as_ref()
                    .is_some_and(|no| *no != article.article_no)
                {
                    continue;
                }
                rows.push(self.row_for(article, doc.level.clone()));
            }
        }
        Ok(rows)
    }

    async fn articles(&self) -> Result<Vec<ArticleRecord>, GraphError> {
        Ok(self.articles.clone())
    }

    async fn ping(&self) -> Result<bool, GraphError> {
        Ok(true)
    }
}
