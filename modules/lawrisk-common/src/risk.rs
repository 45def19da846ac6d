use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LawRiskError;

/// Precomputed risk tier of an article. Declaration order is the display
/// order: `High < Medium < Low < None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[serde(alias = "high", alias = "High")]
    High,
    #[serde(alias = "MID", alias = "mid", alias = "medium", alias = "Medium")]
    Medium,
    #[serde(alias = "low", alias = "Low")]
    Low,
    /// Missing or unrecognized `risk_level_final`.
    #[default]
    #[serde(alias = "none", alias = "None")]
    None,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::None,
    ];

    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
            RiskLevel::None => 3,
        }
    }

    /// Tier as recorded on the node. Anything unrecognized falls into `None`.
    pub fn from_recorded(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(RiskLevel::None)
    }

    /// Tier used for filtering, sorting and display: unrated articles are
    /// treated as `Low`.
    pub fn effective(self) -> Self {
        match self {
            RiskLevel::None => RiskLevel::Low,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::None => "NONE",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = LawRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(RiskLevel::High),
            "MEDIUM" | "MID" => Ok(RiskLevel::Medium),
            "LOW" => Ok(RiskLevel::Low),
            "NONE" => Ok(RiskLevel::None),
            other => Err(LawRiskError::Validation(format!("unknown risk level: {other}"))),
        }
    }
}

/// Anything carrying a precomputed risk tier.
pub trait RiskRated {
    fn recorded_risk(&self) -> RiskLevel;

    fn effective_risk(&self) -> RiskLevel {
        self.recorded_risk().effective()
    }
}

impl<T: RiskRated + ?Sized> RiskRated for &T {
    fn recorded_risk(&self) -> RiskLevel {
        (**self).recorded_risk()
    }
}

/// Per-tier counts, taken from recorded tiers so unrated articles stay
/// visible as `none` instead of being folded into `low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
    pub total: usize,
}

impl RiskSummary {
    pub fn count<T: RiskRated>(items: &[T]) -> Self {
        RiskBuckets::classify(items).summary()
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
            RiskLevel::None => self.none,
        }
    }
}

/// Items partitioned by recorded tier, each tier keeping input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskBuckets<T> {
    pub high: Vec<T>,
    pub medium: Vec<T>,
    pub low: Vec<T>,
    pub none: Vec<T>,
}

impl<T> Default for RiskBuckets<T> {
    fn default() -> Self {
        Self {
            high: Vec::new(),
            medium: Vec::new(),
            low: Vec::new(),
            none: Vec::new(),
        }
    }
}

impl<T: RiskRated> RiskBuckets<T> {
    pub fn classify(items: impl IntoIterator<Item = T>) -> Self {
        let mut buckets = RiskBuckets::default();
        for item in items {
            match item.recorded_risk() {
                RiskLevel::High => buckets.high.push(item),
                RiskLevel::Medium => buckets.medium.push(item),
                RiskLevel::Low => buckets.low.push(item),
                RiskLevel::None => buckets.none.push(item),
            }
        }
        buckets
    }

    pub fn tier(&self, level: RiskLevel) -> &[T] {
        match level {
            RiskLevel::High => &self.high,
            RiskLevel::Medium => &self.medium,
            RiskLevel::Low => &self.low,
            RiskLevel::None => &self.none,
        }
    }

    pub fn summary(&self) -> RiskSummary {
        let (high, medium, low, none) = (
            self.high.len(),
            self.medium.len(),
            self.low.len(),
            self.none.len(),
        );
        RiskSummary {
            high,
            medium,
            low,
            none,
            total: high + medium + low + none,
        }
    }

    /// Concatenate tiers back into one list in rank order.
    pub fn into_ranked(self) -> Vec<T> {
        let mut out = self.high;
        out.extend(self.medium);
        out.extend(self.low);
        out.extend(self.none);
        out
    }
}

/// Stable sort by effective tier rank. Ties keep their input order.
pub fn sort_by_risk<T: RiskRated>(items: &mut [T]) {
    items.sort_by_key(|item| item.effective_risk().rank());
}
