pub mod config;
pub mod dashboard;
pub mod error;
pub mod evidence;
pub mod filter;
pub mod obligation;
pub mod risk;
pub mod types;
pub mod wire;

pub use config::{Config, GraphSource};
pub use dashboard::{DashboardEntry, DashboardView};
pub use error::LawRiskError;
pub use evidence::{highlight, highlight_with, Emphasis, EvidenceHighlight, EvidenceValue};
pub use filter::{apply_filters, Equipment, FilterOptions, Industry};
pub use obligation::extract_highlights;
pub use risk::{sort_by_risk, RiskBuckets, RiskLevel, RiskRated, RiskSummary};
pub use types::*;
