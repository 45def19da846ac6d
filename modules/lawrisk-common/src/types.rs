use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LawRiskError;
use crate::evidence::EvidenceValue;
use crate::risk::{RiskLevel, RiskRated};
use crate::wire::{nullable_string, string_or_number, truthy};

// --- Articles ---

/// One statutory article as stored in the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub node_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub law_name: String,
    /// Kept as text so numbers like `"3-2"` survive.
    #[serde(default, deserialize_with = "string_or_number")]
    pub article_no: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default)]
    pub risk_level_final: Option<String>,
    #[serde(default)]
    pub risk_evidence: EvidenceValue,
    /// Set when a linked penalty raised this article's tier.
    #[serde(default, deserialize_with = "truthy")]
    pub risk_from_penalties_level: bool,
}

impl RiskRated for ArticleRecord {
    fn recorded_risk(&self) -> RiskLevel {
        RiskLevel::from_recorded(self.risk_level_final.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Contains,
    Hierarchy,
    ReferenceWeak,
    PenaltyLink,
    DelegationPattern,
}

impl RelationType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::Contains => "CONTAINS",
            RelationType::Hierarchy => "HIERARCHY",
            RelationType::ReferenceWeak => "REFERENCE_WEAK",
            RelationType::PenaltyLink => "PENALTY_LINK",
            RelationType::DelegationPattern => "DELEGATION_PATTERN",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CONTAINS" => Some(RelationType::Contains),
            "HIERARCHY" => Some(RelationType::Hierarchy),
            "REFERENCE_WEAK" => Some(RelationType::ReferenceWeak),
            "PENALTY_LINK" => Some(RelationType::PenaltyLink),
            "DELEGATION_PATTERN" => Some(RelationType::DelegationPattern),
            _ => None,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of a `HIERARCHY` edge the neighbour sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Parent,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedArticle {
    pub node_id: String,
    pub article_no: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLink {
    pub node_id: String,
    pub article_no: String,
    pub title: String,
    pub direction: Direction,
}

/// Merged view of outgoing `HIERARCHY` and `REFERENCE_WEAK` neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedArticle {
    pub node_id: String,
    pub article_no: String,
    pub title: String,
    pub relation_type: RelationType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyArticle {
    pub node_id: String,
    pub article_no: String,
    pub title: String,
    pub content: String,
}

/// The assembled one-hop neighbourhood of a focal article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleBundle {
    pub node_id: String,
    pub law_name: String,
    pub article_no: String,
    pub title: String,
    pub content: String,
    /// Level of the owning document (Act/Decree/Rule).
    pub level: Option<String>,
    /// Recorded tier; `NONE` when the graph has none.
    pub risk_level: RiskLevel,
    pub risk_evidence: EvidenceValue,
    pub risk_from_penalties: bool,
    pub related_articles: Vec<RelatedArticle>,
    pub penalties: Vec<PenaltyArticle>,
    pub hierarchy: Vec<HierarchyLink>,
    pub reference_weak: Vec<LinkedArticle>,
    pub delegation_pattern: Vec<LinkedArticle>,
    pub highlights: Vec<String>,
}

impl ArticleBundle {
    /// A bundle with every relation bucket empty.
    pub fn new(article: ArticleRecord, level: Option<String>) -> Self {
        let risk_level = article.recorded_risk();
        Self {
            node_id: article.node_id,
            law_name: article.law_name,
            article_no: article.article_no,
            title: article.title,
            content: article.content,
            level,
            risk_level,
            risk_evidence: article.risk_evidence,
            risk_from_penalties: article.risk_from_penalties_level,
            related_articles: Vec::new(),
            penalties: Vec::new(),
            hierarchy: Vec::new(),
            reference_weak: Vec::new(),
            delegation_pattern: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

impl RiskRated for ArticleBundle {
    fn recorded_risk(&self) -> RiskLevel {
        self.risk_level
    }
}

// --- Queries ---

/// Which articles to resolve: a whole statute, or one article of it.
/// `level` narrows the owning documents to one tier of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleScope {
    pub law_name: String,
    pub article_no: Option<String>,
    pub level: Option<String>,
}

impl ArticleScope {
    pub fn statute(law_name: impl Into<String>) -> Self {
        Self {
            law_name: law_name.into(),
            article_no: None,
            level: None,
        }
    }

    pub fn article(law_name: impl Into<String>, article_no: impl Into<String>) -> Self {
        Self {
            law_name: law_name.into(),
            article_no: Some(article_no.into()),
            level: None,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub law_name: String,
    #[serde(default)]
    pub article_no: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl AnalyzeRequest {
    /// Blank optional fields mean "not given".
    pub fn scope(&self) -> Result<ArticleScope, LawRiskError> {
        let law_name = self.law_name.trim();
        if law_name.is_empty() {
            return Err(LawRiskError::Validation("law_name must not be empty".into()));
        }
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Ok(ArticleScope {
            law_name: law_name.to_string(),
            article_no: non_blank(&self.article_no),
            level: non_blank(&self.level),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub law_name: String,
    pub articles: Vec<ArticleBundle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_record_tolerates_loose_properties() {
        let record: ArticleRecord = serde_json::from_str(
            r#"{
                "node_id": "A1",
                "law_name": "산업안전보건법",
                "article_no": 38,
                "title": null,
                "risk_level_final": "MID",
                "risk_evidence": "['보관']",
                "risk_from_penalties_level": "HIGH"
            }"#,
        )
        .unwrap();
        assert_eq!(record.article_no, "38");
        assert_eq!(record.title, "");
        assert_eq!(record.content, "");
        assert_eq!(record.recorded_risk(), RiskLevel::Medium);
        assert!(record.risk_from_penalties_level);
    }

    #[test]
    fn test_analyze_request_blank_optionals_are_dropped() {
        let req = AnalyzeRequest {
            law_name: " 산업안전보건법 ".into(),
            article_no: Some("  ".into()),
            level: Some("법률".into()),
        };
        let scope = req.scope().unwrap();
        assert_eq!(scope, ArticleScope::statute("산업안전보건법").with_level("법률"));
    }

    #[test]
    fn test_analyze_request_requires_law_name() {
        let req = AnalyzeRequest {
            law_name: "   ".into(),
            article_no: None,
            level: None,
        };
        assert!(req.scope().is_err());
    }
}
