//! Quick check for whether a page is worth running extraction on.
//!
//! Much cheaper than [`crate::extract`]: no passes, no cleanup, just a sum
//! over long visible text blocks.

use crate::dom::{self, NodeId, Tree};
use crate::extractor::prep::is_probably_visible;
use crate::patterns::{is_unlikely_candidate, maybe_its_a_candidate};
use crate::text::char_count;

/// Blocks shorter than this do not count.
const MIN_CONTENT_LENGTH: usize = 140;

/// The page is readerable once the score exceeds this.
const MIN_SCORE: f64 = 20.0;

/// Whether `html` probably has an article worth extracting.
///
/// # Example
///
/// ```rust
/// use rs_readability::is_probably_readerable;
///
/// let text = "A sentence that goes on for a while. ".repeat(20);
/// assert!(is_probably_readerable(&format!("<p>{text}</p>")));
/// assert!(!is_probably_readerable("<p>Too short.</p>"));
/// ```
#[must_use]
pub fn is_probably_readerable(html: &str) -> bool {
    is_tree_readerable(&dom::parse(html))
}

/// [`is_probably_readerable`] on an already parsed document.
#[must_use]
pub fn is_tree_readerable(tree: &Tree) -> bool {
    let mut score = 0.0;

    candidate_blocks(tree).into_iter().any(|node| {
        if !is_probably_visible(tree, node) {
            return false;
        }

        let match_string = tree.match_string(node);
        if is_unlikely_candidate(&match_string) && !maybe_its_a_candidate(&match_string) {
            return false;
        }

        if tree.tag_name(node) == "p" && tree.has_ancestor_tag(node, "li", 0, None) {
            return false;
        }

        let length = char_count(tree.text_content(node).trim());
        if length < MIN_CONTENT_LENGTH {
            return false;
        }

        score += ((length - MIN_CONTENT_LENGTH) as f64).sqrt();
        score > MIN_SCORE
    })
}

/// `p`, `pre` and `article` elements, then the `div`s holding a `<br>`
/// directly. Each node appears once.
fn candidate_blocks(tree: &Tree) -> Vec<NodeId> {
    let root = tree.root();
    let mut nodes = tree.elements_by_tag_names(root, &["p", "pre", "article"]);

    for br in tree.elements_by_tag_name(root, "br") {
        if let Some(parent) = tree.parent(br) {
            if tree.tag_name(parent) == "div" && !nodes.contains(&parent) {
                nodes.push(parent);
            }
        }
    }
    nodes
}
