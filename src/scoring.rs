//! Content scoring.
//!
//! Scores are kept out of the tree in a [`ScoreTable`] keyed by [`NodeId`].
//! A table belongs to exactly one extraction pass and is dropped with it.
//!
//! Scoring works bottom-up: every scorable element (by default `p`, `td`,
//! `pre`, `section` and `h2`-`h6`) with enough text hands points to up to five
//! ancestors, with less going to the more distant ones. Those ancestors are
//! the candidates for the article root.

use std::collections::HashMap;

use crate::dom::{NodeId, Tree};
use crate::link_density::link_density;
use crate::patterns::{is_negative_class, is_positive_class};
use crate::text::count_chars_and_commas;

/// Elements with less text than this do not contribute.
pub const MIN_SCORED_CHARS: usize = 25;

/// How many ancestors receive points from one element.
pub const SCORED_ANCESTOR_DEPTH: usize = 5;

/// Per-pass content scores.
#[derive(Debug, Default, Clone)]
pub struct ScoreTable {
    scores: HashMap<NodeId, f64>,
}

impl ScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    /// Score of `id`, or 0 when it has none.
    #[must_use]
    pub fn score(&self, id: NodeId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    #[must_use]
    pub fn has(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    pub fn set(&mut self, id: NodeId, score: f64) {
        self.scores.insert(id, score);
    }

    pub fn add(&mut self, id: NodeId, delta: f64) {
        *self.scores.entry(id).or_insert(0.0) += delta;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// ±25 for each of class and id that matches the positive/negative lists.
/// Always 0 when `use_weight_classes` is off.
#[must_use]
pub fn class_weight(tree: &Tree, id: NodeId, use_weight_classes: bool) -> i32 {
    if !use_weight_classes {
        return 0;
    }

    let mut weight = 0;
    for value in [tree.class_name(id), tree.id_attr(id)] {
        if value.is_empty() {
            continue;
        }
        if is_negative_class(&value) {
            weight -= 25;
        }
        if is_positive_class(&value) {
            weight += 25;
        }
    }
    weight
}

/// Base score a tag starts with.
#[must_use]
pub fn tag_bonus(tag: &str) -> f64 {
    match tag {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    }
}

/// Gives `id` its starting score: class weight plus tag bonus.
pub fn initialize_node(tree: &Tree, id: NodeId, scores: &mut ScoreTable, use_weight_classes: bool) {
    let score = f64::from(class_weight(tree, id, use_weight_classes)) + tag_bonus(&tree.tag_name(id));
    scores.set(id, score);
}

/// Divisor applied to an element's points at ancestor `level` (0 = parent).
#[must_use]
pub fn score_divider(level: usize) -> usize {
    match level {
        0 => 1,
        1 => 2,
        _ => level * 3,
    }
}

/// Points an element with this much text is worth before division.
#[must_use]
pub fn content_score(chars: usize, commas: usize) -> usize {
    1 + commas + (chars / 100).min(3)
}

/// Scores `elements` into their ancestors and returns every ancestor that
/// received a score for the first time, in the order they were met.
pub fn score_elements(
    tree: &Tree,
    elements: &[NodeId],
    scores: &mut ScoreTable,
    use_weight_classes: bool,
) -> Vec<NodeId> {
    let mut candidates = Vec::new();

    for &element in elements {
        if !tree.parent(element).is_some_and(|p| tree.is_element(p)) {
            continue;
        }

        let (chars, commas) = count_chars_and_commas(tree, element);
        if chars < MIN_SCORED_CHARS {
            continue;
        }

        let ancestors = tree.ancestors(element, SCORED_ANCESTOR_DEPTH);
        if ancestors.is_empty() {
            continue;
        }

        let points = content_score(chars, commas) as f64;

        for (level, &ancestor) in ancestors.iter().enumerate() {
            // The document root and <html> never compete.
            if !tree.is_element(ancestor)
                || !tree.parent(ancestor).is_some_and(|p| tree.is_element(p))
            {
                continue;
            }

            if !scores.has(ancestor) {
                initialize_node(tree, ancestor, scores, use_weight_classes);
                candidates.push(ancestor);
            }

            scores.add(ancestor, points / score_divider(level) as f64);
        }
    }

    candidates
}

/// Scales each candidate's score by `1 - link_density`.
pub fn rescale_by_link_density(tree: &Tree, candidates: &[NodeId], scores: &mut ScoreTable) {
    for &candidate in candidates {
        let scaled = scores.score(candidate) * (1.0 - link_density(tree, candidate));
        scores.set(candidate, scaled);
    }
}
