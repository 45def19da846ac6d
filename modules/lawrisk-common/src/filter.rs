use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LawRiskError;
use crate::risk::{sort_by_risk, RiskLevel, RiskRated};
use crate::types::ArticleRecord;

/// Industry profiles, each mapped to the statutes that regulate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "건설업", alias = "construction")]
    Construction,
    #[serde(rename = "제조업", alias = "manufacturing")]
    Manufacturing,
    #[serde(rename = "환경/에너지", alias = "environment_energy")]
    EnvironmentEnergy,
}

impl Industry {
    pub const ALL: [Industry; 3] = [
        Industry::Construction,
        Industry::Manufacturing,
        Industry::EnvironmentEnergy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Construction => "건설업",
            Industry::Manufacturing => "제조업",
            Industry::EnvironmentEnergy => "환경/에너지",
        }
    }

    pub fn statutes(self) -> &'static [&'static str] {
        match self {
            Industry::Construction => &[
                "건설기계관리법",
                "건설기술 진흥법",
                "건설산업기본법",
                "산업안전보건법",
            ],
            Industry::Manufacturing => &[
                "산업안전보건법",
                "대기환경보전법",
                "폐기물관리법",
                "고압가스 안전관리법",
            ],
            Industry::EnvironmentEnergy => &["대기환경보전법", "폐기물관리법", "소방기본법"],
        }
    }

    /// Decrees and rules carry the parent Act's name (`산업안전보건법 시행령`),
    /// so membership is a containment test rather than equality.
    pub fn covers(self, law_name: &str) -> bool {
        self.statutes().iter().any(|s| law_name.contains(s))
    }

    /// Parse a profile selection. `"전체 보기"`/`"all"`/blank means no restriction.
    pub fn parse_selection(raw: &str) -> Result<Option<Industry>, LawRiskError> {
        match raw.trim() {
            "" | "전체 보기" | "all" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = LawRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "건설업" | "construction" => Ok(Industry::Construction),
            "제조업" | "manufacturing" => Ok(Industry::Manufacturing),
            "환경/에너지" | "environment_energy" => Ok(Industry::EnvironmentEnergy),
            other => Err(LawRiskError::Validation(format!("unknown industry: {other}"))),
        }
    }
}

/// Equipment an organization operates, each mapped to content keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    #[serde(rename = "크레인/리프트", alias = "crane")]
    Crane,
    #[serde(rename = "지게차", alias = "forklift")]
    Forklift,
    #[serde(rename = "압력용기", alias = "pressure_vessel")]
    PressureVessel,
    #[serde(rename = "소각시설", alias = "incinerator")]
    Incinerator,
    #[serde(rename = "화학물질 저장소", alias = "chemical_storage")]
    ChemicalStorage,
}

impl Equipment {
    pub const ALL: [Equipment; 5] = [
        Equipment::Crane,
        Equipment::Forklift,
        Equipment::PressureVessel,
        Equipment::Incinerator,
        Equipment::ChemicalStorage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Equipment::Crane => "크레인/리프트",
            Equipment::Forklift => "지게차",
            Equipment::PressureVessel => "압력용기",
            Equipment::Incinerator => "소각시설",
            Equipment::ChemicalStorage => "화학물질 저장소",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Equipment::Crane => &["크레인", "리프트", "기중기", "승강기"],
            Equipment::Forklift => &["지게차", "운반"],
            Equipment::PressureVessel => &["압력용기", "고압가스", "저장탱크"],
            Equipment::Incinerator => &["소각", "연소", "배출"],
            Equipment::ChemicalStorage => &["화학물질", "유해물질", "저장소", "보관"],
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Equipment {
    type Err = LawRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "크레인/리프트" | "crane" => Ok(Equipment::Crane),
            "지게차" | "forklift" => Ok(Equipment::Forklift),
            "압력용기" | "pressure_vessel" => Ok(Equipment::PressureVessel),
            "소각시설" | "incinerator" => Ok(Equipment::Incinerator),
            "화학물질 저장소" | "chemical_storage" => Ok(Equipment::ChemicalStorage),
            other => Err(LawRiskError::Validation(format!("unknown equipment: {other}"))),
        }
    }
}

/// Dashboard filter selection. Every constraint is ANDed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// `None` shows every statute.
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Tiers to keep, matched against the effective tier. An empty list
    /// keeps nothing.
    #[serde(default = "default_risk_tiers")]
    pub risk_tiers: Vec<RiskLevel>,
    #[serde(default)]
    pub keyword: Option<String>,
}

pub fn default_risk_tiers() -> Vec<RiskLevel> {
    vec![RiskLevel::High, RiskLevel::Medium]
}

/// Parse a comma-separated tier selection such as `"HIGH,mid"`. Blank items
/// are skipped. `NONE` is rejected: unrated articles are filtered as `LOW`.
pub fn parse_risk_tiers(raw: &str) -> Result<Vec<RiskLevel>, LawRiskError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<RiskLevel>()? {
            RiskLevel::None => Err(LawRiskError::Validation(
                "NONE is not a selectable tier; unrated articles are listed as LOW".into(),
            )),
            level => Ok(level),
        })
        .collect()
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            industry: None,
            equipment: Vec::new(),
            risk_tiers: default_risk_tiers(),
            keyword: None,
        }
    }
}

impl FilterOptions {
    /// No restriction at all, every tier included.
    pub fn show_all() -> Self {
        Self {
            risk_tiers: vec![RiskLevel::High, RiskLevel::Medium, RiskLevel::Low],
            ..Self::default()
        }
    }

    fn equipment_keywords(&self) -> Vec<&'static str> {
        self.equipment.iter().flat_map(|e| e.keywords().iter().copied()).collect()
    }

    fn active_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// Human-readable description of the active profile, e.g.
    /// `"업종: 건설업 / 설비: 크레인/리프트"`.
    pub fn scope_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(industry) = self.industry {
            parts.push(format!("업종: {industry}"));
        }
        if !self.equipment.is_empty() {
            let labels: Vec<&str> = self.equipment.iter().map(|e| e.label()).collect();
            parts.push(format!("설비: {}", labels.join(", ")));
        }
        if parts.is_empty() {
            "전체 법령".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

/// Apply statute, equipment, tier and keyword predicates in that order, then
/// sort stably by effective tier.
pub fn apply_filters<'a>(
    articles: &'a [ArticleRecord],
    options: &FilterOptions,
) -> Vec<&'a ArticleRecord> {
    let equipment_keywords = options.equipment_keywords();
    let keyword = options.active_keyword();

    let mut kept: Vec<&ArticleRecord> = articles
        .iter()
        .filter(|a| options.industry.map_or(true, |i| i.covers(&a.law_name)))
        .filter(|a| {
            options.equipment.is_empty() || equipment_keywords.iter().any(|k| a.content.contains(k))
        })
        .filter(|a| options.risk_tiers.contains(&a.effective_risk()))
        .filter(|a| keyword.map_or(true, |k| a.content.contains(k)))
        .collect();

    sort_by_risk(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_covers_decrees_of_listed_acts() {
        assert!(Industry::Construction.covers("산업안전보건법 시행규칙"));
        assert!(!Industry::EnvironmentEnergy.covers("건설기술 진흥법"));
    }

    #[test]
    fn test_parse_selection_accepts_show_all() {
        assert_eq!(Industry::parse_selection("전체 보기").unwrap(), None);
        assert_eq!(
            Industry::parse_selection("construction").unwrap(),
            Some(Industry::Construction)
        );
        assert!(Industry::parse_selection("광업").is_err());
    }

    #[test]
    fn test_equipment_serde_uses_korean_labels() {
        let json = serde_json::to_string(&Equipment::Crane).unwrap();
        assert_eq!(json, "\"크레인/리프트\"");
        let parsed: Equipment = serde_json::from_str("\"forklift\"").unwrap();
        assert_eq!(parsed, Equipment::Forklift);
    }

    #[test]
    fn test_risk_selection_rejects_none() {
        assert_eq!(
            parse_risk_tiers("HIGH, mid,,low").unwrap(),
            vec![RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
        );
        assert!(parse_risk_tiers("").unwrap().is_empty());
        assert!(parse_risk_tiers("HIGH,NONE").is_err());
        assert!(parse_risk_tiers("none").is_err());
    }

    #[test]
    fn test_options_from_json_accept_any_tier_case() {
        let options: FilterOptions =
            serde_json::from_str(r#"{"industry": "construction", "risk_tiers": ["high", "mid"]}"#)
                .unwrap();
        assert_eq!(options.industry, Some(Industry::Construction));
        assert_eq!(options.risk_tiers, vec![RiskLevel::High, RiskLevel::Medium]);
        assert!(options.equipment.is_empty());
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(FilterOptions::default().scope_label(), "전체 법령");
        let options = FilterOptions {
            industry: Some(Industry::Construction),
            equipment: vec![Equipment::Crane, Equipment::Forklift],
            ..FilterOptions::default()
        };
        assert_eq!(options.scope_label(), "업종: 건설업 / 설비: 크레인/리프트, 지게차");
    }
}
