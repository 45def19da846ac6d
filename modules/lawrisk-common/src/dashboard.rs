use serde::Serialize;

use crate::evidence::{highlight_with, Emphasis};
use crate::filter::{apply_filters, FilterOptions};
use crate::obligation::extract_highlights;
use crate::risk::{RiskLevel, RiskRated, RiskSummary};
use crate::types::ArticleRecord;

/// One row of the risk listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardEntry {
    pub node_id: String,
    pub law_name: String,
    pub article_no: String,
    pub title: String,
    /// Effective tier (unrated shows as `LOW`).
    pub risk_level: RiskLevel,
    /// Content with evidence keywords marked.
    pub content: String,
    pub evidence_summary: Option<String>,
    pub highlights: Vec<String>,
    pub penalty_linked: bool,
}

impl DashboardEntry {
    fn from_article(article: &ArticleRecord, emphasis: Emphasis) -> Self {
        let marked = highlight_with(&article.content, &article.risk_evidence, emphasis);
        Self {
            node_id: article.node_id.clone(),
            law_name: article.law_name.clone(),
            article_no: article.article_no.clone(),
            title: article.title.clone(),
            risk_level: article.effective_risk(),
            content: marked.text,
            evidence_summary: marked.summary,
            highlights: extract_highlights(&article.content),
            penalty_linked: article.risk_from_penalties_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub scope: String,
    /// Counts over the filtered set by recorded tier.
    pub summary: RiskSummary,
    /// Informational "nothing matched" state, not an error.
    pub no_matches: bool,
    pub articles: Vec<DashboardEntry>,
}

impl DashboardView {
    pub fn build(articles: &[ArticleRecord], options: &FilterOptions, emphasis: Emphasis) -> Self {
        let kept = apply_filters(articles, options);
        let summary = RiskSummary::count(&kept);
        let entries: Vec<DashboardEntry> = kept
            .into_iter()
            .map(|a| DashboardEntry::from_article(a, emphasis))
            .collect();

        Self {
            scope: options.scope_label(),
            summary,
            no_matches: entries.is_empty(),
            articles: entries,
        }
    }
}
