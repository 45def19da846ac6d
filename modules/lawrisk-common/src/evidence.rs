//! Risk evidence: the keyword fragments recorded on an article that explain
//! its risk tier, and the marking of those fragments in the article text.
//!
//! Evidence arrives in several shapes depending on how the graph was built
//! (plain string, stringified list, native list, null, NaN). Everything is
//! folded into [`EvidenceValue`] at deserialization time and normalized in
//! one place, [`EvidenceValue::candidates`].

use serde::{Deserialize, Deserializer, Serialize};

/// Boilerplate legal endings that say nothing about why an article is risky.
pub const STOP_PHRASES: [&str; 4] = ["할 수 있다", "하여야 한다", "수 있다", "한다"];

/// Fragments shorter than this (in characters) are noise.
pub const MIN_CANDIDATE_CHARS: usize = 2;

const LIST_DECORATION: [char; 4] = ['[', ']', '\'', '"'];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvidenceValue {
    #[default]
    Absent,
    /// Free text or a stringified list such as `"['보관', '위험물']"`.
    Text(String),
    List(Vec<String>),
    /// Numeric sentinel (NaN from tabular exports). Carries no keywords.
    Number(f64),
}

impl<'de> Deserialize<'de> for EvidenceValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Item {
            Text(String),
            Int(i64),
            Float(f64),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            List(Vec<Option<Item>>),
            Int(i64),
            Float(f64),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Other(_)) => EvidenceValue::Absent,
            Some(Raw::Text(s)) => EvidenceValue::Text(s),
            Some(Raw::Int(n)) => EvidenceValue::Number(n as f64),
            Some(Raw::Float(n)) => EvidenceValue::Number(n),
            Some(Raw::List(items)) => EvidenceValue::List(
                items
                    .into_iter()
                    .flatten()
                    .map(|item| match item {
                        Item::Text(s) => s,
                        Item::Int(n) => n.to_string(),
                        Item::Float(n) => n.to_string(),
                    })
                    .collect(),
            ),
        })
    }
}

impl From<&str> for EvidenceValue {
    fn from(s: &str) -> Self {
        EvidenceValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for EvidenceValue {
    fn from(items: Vec<&str>) -> Self {
        EvidenceValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl EvidenceValue {
    /// True when there is nothing to derive keywords from.
    pub fn is_empty(&self) -> bool {
        match self {
            EvidenceValue::Absent | EvidenceValue::Number(_) => true,
            EvidenceValue::Text(s) => s.trim().is_empty(),
            EvidenceValue::List(items) => items.is_empty(),
        }
    }

    /// Keyword candidates in derivation order, after stripping list
    /// decoration, splitting on commas and dropping stop phrases and
    /// fragments shorter than [`MIN_CANDIDATE_CHARS`].
    pub fn candidates(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let joined;
        let raw = match self {
            EvidenceValue::Text(s) => s.as_str(),
            EvidenceValue::List(items) => {
                joined = items.join(",");
                joined.as_str()
            }
            EvidenceValue::Absent | EvidenceValue::Number(_) => return Vec::new(),
        };

        let cleaned: String = raw.chars().filter(|c| !LIST_DECORATION.contains(c)).collect();
        cleaned
            .split(',')
            .map(str::trim)
            .filter(|k| !STOP_PHRASES.contains(k))
            .filter(|k| k.chars().count() >= MIN_CANDIDATE_CHARS)
            .map(str::to_string)
            .collect()
    }
}

/// How a matched keyword is rendered in the returned text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// `**k**`
    #[default]
    Markdown,
    /// `:red[**k**]`
    ColoredMarkdown,
    /// `<mark>k</mark>`
    Html,
}

impl Emphasis {
    pub fn render(self, keyword: &str) -> String {
        match self {
            Emphasis::Markdown => format!("**{keyword}**"),
            Emphasis::ColoredMarkdown => format!(":red[**{keyword}**]"),
            Emphasis::Html => format!("<mark>{keyword}</mark>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceHighlight {
    pub text: String,
    /// Comma-joined candidates; `None` when no candidate appears in the text.
    pub summary: Option<String>,
}

impl EvidenceHighlight {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            summary: None,
        }
    }
}

pub fn highlight(text: &str, evidence: &EvidenceValue) -> EvidenceHighlight {
    highlight_with(text, evidence, Emphasis::default())
}

/// Mark every evidence keyword that occurs in `text`.
///
/// Replacement is literal and runs candidate by candidate against the text
/// as already marked, so an earlier candidate can hide a later overlapping
/// one (`"위험물"` marked first leaves no bare `"위험"` to find). This order
/// dependence is intended.
pub fn highlight_with(text: &str, evidence: &EvidenceValue, emphasis: Emphasis) -> EvidenceHighlight {
    let candidates = evidence.candidates();
    if candidates.is_empty() {
        return EvidenceHighlight::unchanged(text);
    }

    let mut marked = text.to_string();
    let mut any_match = false;
    for keyword in &candidates {
        if marked.contains(keyword.as_str()) {
            marked = marked.replace(keyword.as_str(), &emphasis.render(keyword));
            any_match = true;
        }
    }

    if !any_match {
        return EvidenceHighlight::unchanged(text);
    }

    EvidenceHighlight {
        text: marked,
        summary: Some(candidates.join(", ")),
    }
}
