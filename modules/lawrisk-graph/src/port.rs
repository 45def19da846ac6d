use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lawrisk_common::wire::{nullable_string, string_or_number};
use lawrisk_common::{ArticleRecord, ArticleScope};

use crate::error::GraphError;

/// Projection of a neighbouring article reached by one hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub node_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub article_no: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
}

impl From<&ArticleRecord> for NeighborRecord {
    fn from(article: &ArticleRecord) -> Self {
        Self {
            node_id: article.node_id.clone(),
            article_no: article.article_no.clone(),
            title: article.title.clone(),
            content: article.content.clone(),
        }
    }
}

/// One focal article with the raw results of its optional traversals.
///
/// Lists come straight from the store and may hold `None` for optional
/// matches that found nothing, or repeat a neighbour reached by several
/// paths. The assembler cleans them up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodRow {
    pub article: ArticleRecord,
    #[serde(default)]
    pub level: Option<String>,
    /// Outgoing `HIERARCHY`.
    #[serde(default)]
    pub children: Vec<Option<NeighborRecord>>,
    /// Incoming `HIERARCHY`.
    #[serde(default)]
    pub parents: Vec<Option<NeighborRecord>>,
    #[serde(default)]
    pub references: Vec<Option<NeighborRecord>>,
    #[serde(default)]
    pub delegations: Vec<Option<NeighborRecord>>,
    #[serde(default)]
    pub penalties: Vec<Option<NeighborRecord>>,
}

/// Read-only access to the legal graph.
#[async_trait]
pub trait LawGraph: Send + Sync {
    /// Articles matching `scope` (through their owning documents) with one
    /// hop of every typed relation. No match is `Ok(vec![])`.
    async fn neighborhoods(&self, scope: &ArticleScope) -> Result<Vec<NeighborhoodRow>, GraphError>;

    /// Every article node, in store order.
    async fn articles(&self) -> Result<Vec<ArticleRecord>, GraphError>;

    /// Liveness of the backing store.
    async fn ping(&self) -> Result<bool, GraphError>;
}
