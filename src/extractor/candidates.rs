//! Picking the article root and gathering related siblings.

use crate::dom::{NodeId, Tree};
use crate::extractor::tags::ALTER_TO_DIV_EXCEPTIONS;
use crate::link_density::link_density;
use crate::patterns::SENTENCE_PERIOD;
use crate::scoring::{initialize_node, ScoreTable};
use crate::text::char_count;

/// Alternatives must score at least this fraction of the top candidate.
const ALTERNATIVE_SCORE_RATIO: f64 = 0.75;

/// Alternatives that must share an ancestor before it replaces the top
/// candidate.
const MIN_SHARED_ANCESTOR_CHAINS: usize = 3;

/// The chosen article root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCandidate {
    pub node: NodeId,
    /// The root is a synthesized `<div>` holding the whole body.
    pub synthesized: bool,
}

/// Best `n` candidates, highest score first. A candidate only displaces an
/// entry with a strictly lower score, so earlier candidates win ties.
#[must_use]
pub fn rank_candidates(candidates: &[NodeId], scores: &ScoreTable, n: usize) -> Vec<NodeId> {
    let mut top: Vec<NodeId> = Vec::with_capacity(n + 1);
    for &candidate in candidates {
        let score = scores.score(candidate);
        let slot = (0..n).find(|&i| top.get(i).is_none_or(|&t| score > scores.score(t)));
        if let Some(i) = slot {
            top.insert(i, candidate);
            top.truncate(n);
        }
    }
    top
}

/// Chooses the article root from the ranked candidates.
///
/// With nothing to go on, or when `<body>` itself wins, every child of the
/// body moves into a new `<div>` appended to it. Otherwise the winner may be
/// swapped for an ancestor it shares with several close runners-up, then for
/// a higher-scoring ancestor, and finally climbs out of single-child wrappers.
pub fn select_top_candidate(
    tree: &mut Tree,
    ranked: &[NodeId],
    scores: &mut ScoreTable,
    use_weight_classes: bool,
) -> TopCandidate {
    let first = ranked.first().copied();
    let Some(mut top) = first.filter(|&c| !tree.is_tag(c, "body")) else {
        let page = tree.body().unwrap_or_else(|| tree.root());
        let div = tree.create_element("div");
        while let Some(child) = tree.first_child(page) {
            tree.append_child(div, child);
        }
        tree.append_child(page, div);
        initialize_node(tree, div, scores, use_weight_classes);
        return TopCandidate {
            node: div,
            synthesized: true,
        };
    };

    top = shared_ancestor(tree, top, ranked, scores).unwrap_or(top);
    if !scores.has(top) {
        initialize_node(tree, top, scores, use_weight_classes);
    }

    // Ancestors get a share of their descendants' points. A score that rises
    // on the way up means more content lives beside the current pick.
    let mut last_score = scores.score(top);
    let threshold = last_score / 3.0;
    let mut parent = tree.parent(top);
    while let Some(p) = parent.filter(|&p| !tree.is_tag(p, "body")) {
        let Some(parent_score) = scores.get(p) else {
            parent = tree.parent(p);
            continue;
        };
        if parent_score < threshold {
            break;
        }
        if parent_score > last_score {
            top = p;
            break;
        }
        last_score = parent_score;
        parent = tree.parent(p);
    }

    while let Some(p) = tree.parent(top) {
        if tree.is_tag(p, "body") || tree.element_children(p).count() != 1 {
            break;
        }
        top = p;
    }

    if !scores.has(top) {
        initialize_node(tree, top, scores, use_weight_classes);
    }

    TopCandidate {
        node: top,
        synthesized: false,
    }
}

/// The nearest ancestor of `top` below `<body>` that contains at least three
/// of the runners-up scoring close to `top`.
fn shared_ancestor(
    tree: &Tree,
    top: NodeId,
    ranked: &[NodeId],
    scores: &ScoreTable,
) -> Option<NodeId> {
    let top_score = scores.score(top);
    let chains: Vec<Vec<NodeId>> = ranked
        .iter()
        .skip(1)
        .filter(|&&c| scores.score(c) / top_score >= ALTERNATIVE_SCORE_RATIO)
        .map(|&c| tree.ancestors(c, 0))
        .collect();

    if chains.len() < MIN_SHARED_ANCESTOR_CHAINS {
        return None;
    }

    let mut parent = tree.parent(top);
    while let Some(p) = parent.filter(|&p| !tree.is_tag(p, "body")) {
        let containing = chains.iter().filter(|chain| chain.contains(&p)).count();
        if containing >= MIN_SHARED_ANCESTOR_CHAINS {
            return Some(p);
        }
        parent = tree.parent(p);
    }
    None
}

/// Whether a sibling of the article root belongs to the article.
fn is_related_sibling(
    tree: &Tree,
    sibling: NodeId,
    top: NodeId,
    scores: &ScoreTable,
    threshold: f64,
) -> bool {
    if sibling == top {
        return true;
    }

    let top_class = tree.class_name(top);
    let bonus = if !top_class.is_empty() && tree.class_name(sibling) == top_class {
        scores.score(top) * 0.2
    } else {
        0.0
    };

    if scores.get(sibling).is_some_and(|s| s + bonus >= threshold) {
        return true;
    }

    if !tree.is_tag(sibling, "p") {
        return false;
    }

    let density = link_density(tree, sibling);
    let content = tree.inner_text(sibling, true);
    let length = char_count(&content);

    if length > 80 {
        density < 0.25
    } else {
        length > 0 && length < 80 && density == 0.0 && SENTENCE_PERIOD.is_match(&content)
    }
}

/// Moves the article root and its related siblings, in order, into a new
/// detached `<div>` and returns it. Siblings outside the usual block tags are
/// retagged to `<div>` on the way.
pub fn gather_siblings(tree: &mut Tree, top: NodeId, scores: &ScoreTable) -> NodeId {
    let article = tree.create_element("div");
    let threshold = f64::max(10.0, scores.score(top) * 0.2);

    let siblings: Vec<NodeId> = match tree.parent(top) {
        Some(parent) => tree.element_children(parent).collect(),
        None => vec![top],
    };

    for sibling in siblings {
        if !is_related_sibling(tree, sibling, top, scores, threshold) {
            continue;
        }
        if !ALTER_TO_DIV_EXCEPTIONS.contains(&tree.tag_name(sibling).as_str()) {
            tree.set_tag_name(sibling, "div");
        }
        tree.append_child(article, sibling);
    }

    article
}
