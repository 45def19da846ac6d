use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lawrisk_common::{
    ArticleBundle, Direction, HierarchyLink, LinkedArticle, PenaltyArticle, RelatedArticle,
    RelationType,
};

use crate::port::{NeighborRecord, NeighborhoodRow};

/// Drop null and id-less placeholders left by optional traversals.
fn present(records: Vec<Option<NeighborRecord>>) -> impl Iterator<Item = NeighborRecord> {
    records
        .into_iter()
        .flatten()
        .filter(|r| !r.node_id.is_empty())
}

fn linked(record: NeighborRecord) -> LinkedArticle {
    LinkedArticle {
        node_id: record.node_id,
        article_no: record.article_no,
        title: record.title,
    }
}

/// Keep the first item for each key.
fn dedup_by<T, K: Hash + Eq>(items: &mut Vec<T>, key: impl Fn(&T) -> K) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(key(item)));
}

fn absorb(bundle: &mut ArticleBundle, row: NeighborhoodRow) {
    if bundle.level.is_none() {
        bundle.level = row.level;
    }

    for child in present(row.children) {
        bundle.hierarchy.push(HierarchyLink {
            node_id: child.node_id,
            article_no: child.article_no,
            title: child.title,
            direction: Direction::Child,
        });
    }
    for parent in present(row.parents) {
        bundle.hierarchy.push(HierarchyLink {
            node_id: parent.node_id,
            article_no: parent.article_no,
            title: parent.title,
            direction: Direction::Parent,
        });
    }
    bundle.reference_weak.extend(present(row.references).map(linked));
    bundle.delegation_pattern.extend(present(row.delegations).map(linked));
    bundle
        .penalties
        .extend(present(row.penalties).map(|p| PenaltyArticle {
            node_id: p.node_id,
            article_no: p.article_no,
            title: p.title,
            content: p.content,
        }));
}

/// Outgoing hierarchy children first, then weak references.
fn related_articles(bundle: &ArticleBundle) -> Vec<RelatedArticle> {
    let children = bundle
        .hierarchy
        .iter()
        .filter(|h| h.direction == Direction::Child)
        .map(|h| RelatedArticle {
            node_id: h.node_id.clone(),
            article_no: h.article_no.clone(),
            title: h.title.clone(),
            relation_type: RelationType::Hierarchy,
        });
    let references = bundle.reference_weak.iter().map(|r| RelatedArticle {
        node_id: r.node_id.clone(),
        article_no: r.article_no.clone(),
        title: r.title.clone(),
        relation_type: RelationType::ReferenceWeak,
    });

    let mut related: Vec<RelatedArticle> = children.chain(references).collect();
    dedup_by(&mut related, |r| r.node_id.clone());
    related
}

/// Turn raw traversal rows into one bundle per focal article.
///
/// Rows for the same article are merged (first-seen order kept), null
/// neighbours are dropped, and every bucket holds each `node_id` once
/// (`hierarchy` once per direction). A node may still show up in several
/// buckets.
pub fn assemble_rows(rows: Vec<NeighborhoodRow>) -> Vec<ArticleBundle> {
    let mut bundles: Vec<ArticleBundle> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for mut row in rows {
        let article = std::mem::take(&mut row.article);
        let slot = match index.get(&article.node_id) {
            Some(&i) => i,
            None => {
                index.insert(article.node_id.clone(), bundles.len());
                bundles.push(ArticleBundle::new(article, None));
                bundles.len() - 1
            }
        };
        absorb(&mut bundles[slot], row);
    }

    for bundle in &mut bundles {
        // a neighbour can be both child and parent; each direction is kept
        dedup_by(&mut bundle.hierarchy, |h| (h.node_id.clone(), h.direction));
        dedup_by(&mut bundle.reference_weak, |r| r.node_id.clone());
        dedup_by(&mut bundle.delegation_pattern, |d| d.node_id.clone());
        dedup_by(&mut bundle.penalties, |p| p.node_id.clone());
        bundle.related_articles = related_articles(bundle);
    }

    bundles
}
