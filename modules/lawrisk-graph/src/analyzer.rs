use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use lawrisk_common::{
    extract_highlights, sort_by_risk, AnalyzeResponse, ArticleBundle, ArticleScope,
    DashboardView, Emphasis, FilterOptions,
};

use crate::assembler::assemble_rows;
use crate::error::GraphError;
use crate::port::LawGraph;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONCURRENCY: usize = 4;

/// Query front-end over a [`LawGraph`]: bounds every graph call by a
/// timeout and shapes results for presentation.
#[derive(Clone)]
pub struct Analyzer {
    graph: Arc<dyn LawGraph>,
    timeout: Duration,
    concurrency: usize,
}

impl Analyzer {
    pub fn new(graph: Arc<dyn LawGraph>) -> Self {
        Self {
            graph,
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, GraphError>>,
    ) -> Result<T, GraphError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| GraphError::Timeout(self.timeout))?
    }

    /// Bundles for every article in `scope`, with obligation highlights.
    /// Bundles keep the store's order.
    pub async fn analyze(&self, scope: &ArticleScope) -> Result<AnalyzeResponse, GraphError> {
        let rows = self.bounded(self.graph.neighborhoods(scope)).await?;
        let mut articles = assemble_rows(rows);
        for bundle in &mut articles {
            bundle.highlights = extract_highlights(&bundle.content);
        }

        info!(
            law_name = %scope.law_name,
            article_no = scope.article_no.as_deref().unwrap_or("*"),
            articles = articles.len(),
            "Analyze complete"
        );

        Ok(AnalyzeResponse {
            law_name: scope.law_name.clone(),
            articles,
        })
    }

    /// Analyze several scopes concurrently, at most `concurrency` at a time.
    /// Responses come back in the order of `scopes`; the first failure
    /// aborts the batch.
    pub async fn analyze_many(
        &self,
        scopes: &[ArticleScope],
    ) -> Result<Vec<AnalyzeResponse>, GraphError> {
        let mut indexed: Vec<(usize, AnalyzeResponse)> = stream::iter(scopes.iter().enumerate())
            .map(|(i, scope)| async move { self.analyze(scope).await.map(|r| (i, r)) })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        indexed.sort_by_key(|(i, _)| *i);
        Ok(indexed.into_iter().map(|(_, r)| r).collect())
    }

    /// Every bundle of every scope in one list, ranked by tier once all
    /// results are in.
    pub async fn ranked_bundles(
        &self,
        scopes: &[ArticleScope],
    ) -> Result<Vec<ArticleBundle>, GraphError> {
        let mut bundles: Vec<ArticleBundle> = self
            .analyze_many(scopes)
            .await?
            .into_iter()
            .flat_map(|r| r.articles)
            .collect();
        sort_by_risk(&mut bundles);
        Ok(bundles)
    }

    /// Filtered, ranked and highlighted article listing.
    pub async fn dashboard(
        &self,
        options: &FilterOptions,
        emphasis: Emphasis,
    ) -> Result<DashboardView, GraphError> {
        let articles = self.bounded(self.graph.articles()).await?;
        let view = DashboardView::build(&articles, options, emphasis);
        debug!(
            scope = %view.scope,
            total = articles.len(),
            kept = view.articles.len(),
            "Dashboard built"
        );
        Ok(view)
    }

    pub async fn ping(&self) -> Result<bool, GraphError> {
        self.bounded(self.graph.ping()).await
    }
}
