use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use lawrisk_common::{
    filter::{default_risk_tiers, parse_risk_tiers},
    Emphasis, Equipment, FilterOptions, Industry, LawRiskError, RiskLevel,
};

use super::{error_response, graph_failure};
use crate::app::AppState;

/// `?industry=&equipment=a,b&risk=HIGH,MEDIUM&q=&emphasis=html`
///
/// `risk` absent means the default tiers; `risk=` (present but empty)
/// selects no tier at all.
#[derive(Debug, Default, Deserialize)]
pub struct ArticlesQuery {
    industry: Option<String>,
    equipment: Option<String>,
    risk: Option<String>,
    q: Option<String>,
    #[serde(default)]
    emphasis: Emphasis,
}

fn comma_list<T>(raw: &str) -> Result<Vec<T>, LawRiskError>
where
    T: std::str::FromStr<Err = LawRiskError>,
{
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

impl ArticlesQuery {
    fn options(&self) -> Result<FilterOptions, LawRiskError> {
        let industry = match self.industry.as_deref() {
            Some(raw) => Industry::parse_selection(raw)?,
            None => None,
        };
        let equipment: Vec<Equipment> = match self.equipment.as_deref() {
            Some(raw) => comma_list(raw)?,
            None => Vec::new(),
        };
        let risk_tiers: Vec<RiskLevel> = match self.risk.as_deref() {
            Some(raw) => parse_risk_tiers(raw)?,
            None => default_risk_tiers(),
        };
        let keyword = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(FilterOptions {
            industry,
            equipment,
            risk_tiers,
            keyword,
        })
    }
}

/// Filtered, risk-ranked article listing with evidence marking.
pub async fn api_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesQuery>,
) -> impl IntoResponse {
    let options = match params.options() {
        Ok(options) => options,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.analyzer.dashboard(&options, params.emphasis).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => graph_failure(&e, "Article listing"),
    }
}
