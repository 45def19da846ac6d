use lawrisk_common::{
    ArticleRecord, DashboardView, Emphasis, EvidenceValue, FilterOptions, Industry, RiskLevel,
};

fn article(
    id: &str,
    law: &str,
    content: &str,
    risk: Option<&str>,
    evidence: EvidenceValue,
) -> ArticleRecord {
    ArticleRecord {
        node_id: id.to_string(),
        law_name: law.to_string(),
        article_no: id.trim_start_matches('A').to_string(),
        title: format!("조문 {id}"),
        content: content.to_string(),
        risk_level_final: risk.map(str::to_string),
        risk_evidence: evidence,
        risk_from_penalties_level: false,
    }
}

#[test]
fn listing_marks_evidence_and_extracts_obligations() {
    let mut hazardous = article(
        "A1",
        "화학물질관리법",
        "사업주는 위험물을 보관하여야 한다",
        Some("HIGH"),
        EvidenceValue::from("보관, 위험물, 할 수 있다"),
    );
    hazardous.risk_from_penalties_level = true;

    let view = DashboardView::build(&[hazardous], &FilterOptions::default(), Emphasis::Markdown);

    assert!(!view.no_matches);
    let entry = &view.articles[0];
    assert_eq!(entry.content, "사업주는 **위험물**을 **보관**하여야 한다");
    assert_eq!(entry.evidence_summary.as_deref(), Some("보관, 위험물"));
    assert_eq!(entry.highlights, vec!["사업주는 위험물을 보관하여야 한다"]);
    assert!(entry.penalty_linked);
}

#[test]
fn summary_counts_unrated_articles_apart_from_low() {
    let articles = vec![
        article("A1", "폐기물관리법", "배출 기준", Some("LOW"), EvidenceValue::Absent),
        article("A2", "폐기물관리법", "보관 기준", None, EvidenceValue::Absent),
        article("A3", "폐기물관리법", "소각 금지", Some("HIGH"), EvidenceValue::Absent),
    ];

    let view = DashboardView::build(&articles, &FilterOptions::show_all(), Emphasis::Markdown);

    assert_eq!(view.summary.high, 1);
    assert_eq!(view.summary.low, 1);
    assert_eq!(view.summary.none, 1);
    assert_eq!(view.summary.total, 3);
    // displayed tier for the unrated article is LOW
    let tiers: Vec<RiskLevel> = view.articles.iter().map(|e| e.risk_level).collect();
    assert_eq!(tiers, vec![RiskLevel::High, RiskLevel::Low, RiskLevel::Low]);
}

#[test]
fn empty_result_is_reported_as_no_matches() {
    let articles = vec![article(
        "A1",
        "소방기본법",
        "소화기 비치",
        Some("HIGH"),
        EvidenceValue::Absent,
    )];
    let options = FilterOptions {
        industry: Some(Industry::Construction),
        ..FilterOptions::default()
    };

    let view = DashboardView::build(&articles, &options, Emphasis::Markdown);

    assert!(view.no_matches);
    assert!(view.articles.is_empty());
    assert_eq!(view.summary.total, 0);
    assert_eq!(view.scope, "업종: 건설업");
}
