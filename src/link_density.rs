//! Link density: how much of a node's text sits inside links.
//!
//! Text under an `<a>` counts toward the link share weighted by the link's
//! coefficient. In-page fragment links (`href="#..."`) weigh 0.3 because
//! tables of contents and footnote anchors are part of the article. Nested
//! links count only toward the innermost one.

use crate::dom::{NodeId, Tree};
use crate::text::CharCounter;

/// Weight of an `<a>` element's text in link density.
#[must_use]
pub fn link_density_coefficient(tree: &Tree, anchor: NodeId) -> f64 {
    let href = tree.attr(anchor, "href").unwrap_or_default();
    let href = href.trim();
    if href.len() > 1 && href.starts_with('#') {
        0.3
    } else {
        1.0
    }
}

/// Weighted link chars divided by total chars. Zero when there is no text.
#[must_use]
pub fn link_density(tree: &Tree, id: NodeId) -> f64 {
    let mut chars = CharCounter::default();
    let mut links: Vec<(CharCounter, f64)> = Vec::new();
    walk(tree, id, None, &mut chars, &mut links);

    if chars.total == 0 {
        return 0.0;
    }
    let weighted: f64 = links
        .iter()
        .map(|(counter, coefficient)| counter.total as f64 * coefficient)
        .sum();
    weighted / chars.total as f64
}

fn walk(
    tree: &Tree,
    id: NodeId,
    mut link: Option<usize>,
    chars: &mut CharCounter,
    links: &mut Vec<(CharCounter, f64)>,
) {
    if tree.is_text(id) {
        for c in tree.text(id).unwrap_or_default().chars() {
            chars.count(c);
            if let Some(i) = link {
                links[i].0.count(c);
            }
        }
        return;
    }
    if tree.is_tag(id, "a") {
        links.push((CharCounter::default(), link_density_coefficient(tree, id)));
        link = Some(links.len() - 1);
    }
    for child in tree.children(id) {
        walk(tree, child, link, chars, links);
    }
}
