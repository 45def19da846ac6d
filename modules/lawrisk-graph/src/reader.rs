use async_trait::async_trait;
use neo4rs::query;
use tracing::debug;

use lawrisk_common::{ArticleRecord, ArticleScope};

use crate::error::GraphError;
use crate::port::{LawGraph, NeighborRecord, NeighborhoodRow};
use crate::GraphClient;

const ARTICLE_PROJECTION: &str = "a {
    .node_id, .law_name, .article_no, .title, .content,
    .risk_level_final, .risk_evidence, .risk_from_penalties_level
}";

/// Each relation is collected in its own `WITH` stage so the optional
/// matches do not multiply into a cartesian product.
const NEIGHBORHOOD_TRAVERSALS: &str = "
OPTIONAL MATCH (a)-[:PENALTY_LINK]->(p:ARTICLE)
WITH d, a, collect(p {.node_id, .article_no, .title, .content}) AS penalties
OPTIONAL MATCH (a)-[:HIERARCHY]->(c:ARTICLE)
WITH d, a, penalties, collect(c {.node_id, .article_no, .title}) AS children
OPTIONAL MATCH (h:ARTICLE)-[:HIERARCHY]->(a)
WITH d, a, penalties, children, collect(h {.node_id, .article_no, .title}) AS parents
OPTIONAL MATCH (a)-[:REFERENCE_WEAK]->(r:ARTICLE)
WITH d, a, penalties, children, parents, collect(r {.node_id, .article_no, .title}) AS weak_refs
OPTIONAL MATCH (a)-[:DELEGATION_PATTERN]->(g:ARTICLE)
WITH d, a, penalties, children, parents, weak_refs,
     collect(g {.node_id, .article_no, .title}) AS delegations";

/// Cypher for one scope. Absent filters are left out of the WHERE clause.
fn neighborhood_cypher(scope: &ArticleScope) -> String {
    let mut conditions = vec!["d.law_name = $law_name"];
    if scope.article_no.is_some() {
        // article numbers are stored as text or integers
        conditions.push("toString(a.article_no) = $article_no");
    }
    if scope.level.is_some() {
        conditions.push("d.level = $level");
    }

    format!(
        "MATCH (d:DOC)-[:CONTAINS]->(a:ARTICLE)
         WHERE {conditions}
         {NEIGHBORHOOD_TRAVERSALS}
         RETURN {ARTICLE_PROJECTION} AS article,
                d.level AS level,
                penalties, children, parents, weak_refs, delegations
         ORDER BY article.node_id",
        conditions = conditions.join(" AND "),
    )
}

/// Neo4j-backed [`LawGraph`]. Expects `:DOC` and `:ARTICLE` labels with
/// `CONTAINS`, `HIERARCHY`, `REFERENCE_WEAK`, `PENALTY_LINK` and
/// `DELEGATION_PATTERN` relationships.
pub struct GraphReader {
    client: GraphClient,
}

impl GraphReader {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LawGraph for GraphReader {
    async fn neighborhoods(&self, scope: &ArticleScope) -> Result<Vec<NeighborhoodRow>, GraphError> {
        let cypher = neighborhood_cypher(scope);
        let mut q = query(&cypher).param("law_name", scope.law_name.as_str());
        if let Some(article_no) = &scope.article_no {
            q = q.param("article_no", article_no.as_str());
        }
        if let Some(level) = &scope.level {
            q = q.param("level", level.as_str());
        }

        let mut rows = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            rows.push(NeighborhoodRow {
                article: row.get::<ArticleRecord>("article")?,
                level: row.get::<Option<String>>("level")?,
                children: row.get::<Vec<Option<NeighborRecord>>>("children")?,
                parents: row.get::<Vec<Option<NeighborRecord>>>("parents")?,
                references: row.get::<Vec<Option<NeighborRecord>>>("weak_refs")?,
                delegations: row.get::<Vec<Option<NeighborRecord>>>("delegations")?,
                penalties: row.get::<Vec<Option<NeighborRecord>>>("penalties")?,
            });
        }

        debug!(law_name = %scope.law_name, rows = rows.len(), "Neighborhood query complete");
        Ok(rows)
    }

    async fn articles(&self) -> Result<Vec<ArticleRecord>, GraphError> {
        let cypher = format!(
            "MATCH (a:ARTICLE)
             RETURN {ARTICLE_PROJECTION} AS article
             ORDER BY article.law_name, article.node_id"
        );

        let mut articles = Vec::new();
        let mut stream = self.client.graph.execute(query(&cypher)).await?;
        while let Some(row) = stream.next().await? {
            articles.push(row.get::<ArticleRecord>("article")?);
        }
        Ok(articles)
    }

    async fn ping(&self) -> Result<bool, GraphError> {
        let mut stream = self.client.graph.execute(query("RETURN 1 AS ok")).await?;
        match stream.next().await? {
            Some(row) => Ok(row.get::<i64>("ok")? == 1),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statute_scope_has_no_article_or_level_filter() {
        let cypher = neighborhood_cypher(&ArticleScope::statute("산업안전보건법"));
        assert!(cypher.contains("WHERE d.law_name = $law_name\n"));
        assert!(!cypher.contains("$article_no"));
        assert!(!cypher.contains("$level"));
    }

    #[test]
    fn test_article_scope_with_level_adds_both_filters() {
        let scope = ArticleScope::article("산업안전보건법", "38").with_level("법률");
        let cypher = neighborhood_cypher(&scope);
        assert!(cypher.contains("toString(a.article_no) = $article_no AND d.level = $level"));
    }

    #[test]
    fn test_article_number_is_compared_as_text() {
        let cypher = neighborhood_cypher(&ArticleScope::article("산업안전보건법", "40"));
        assert!(cypher.contains("toString(a.article_no) = $article_no"));
        assert!(!cypher.contains(" a.article_no = $article_no"));
    }

    #[test]
    fn test_every_relation_is_collected() {
        let cypher = neighborhood_cypher(&ArticleScope::statute("x"));
        for relation in [
            "PENALTY_LINK",
            "HIERARCHY",
            "REFERENCE_WEAK",
            "DELEGATION_PATTERN",
        ] {
            assert!(cypher.contains(relation), "{relation}");
        }
    }
}
