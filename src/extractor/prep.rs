//! Document preparation and the pre-scoring walk.
//!
//! [`prep_document`] normalizes markup that confuses scoring. Then
//! [`collect_elements_to_score`] walks the page once, drops nodes that cannot be
//! content, turns misused `<div>`s into paragraphs, and returns the elements
//! whose text will be scored.

use crate::dom::{NodeId, Tree};
use crate::extractor::state::{Flags, PageFacts};
use crate::extractor::tags::{is_heading, is_unlikely_role};
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{
    is_byline, is_unlikely_candidate, maybe_its_a_candidate, DISPLAY_NONE, VISIBILITY_HIDDEN,
};
use crate::text::{char_count, normalize_whitespace, text_similarity};

/// Headings at least this similar to the title are treated as duplicates.
const TITLE_SIMILARITY: f64 = 0.75;

/// Bylines must be shorter than this many characters.
const MAX_BYLINE_CHARS: usize = 100;

/// Removes comments and `<style>`, folds `<br>` chains into paragraphs and
/// retags `<font>` as `<span>`.
pub fn prep_document(tree: &mut Tree) {
    let root = tree.root();

    let comments: Vec<NodeId> = tree
        .descendants(root)
        .filter(|&n| tree.is_comment(n))
        .collect();
    for comment in comments {
        tree.detach(comment);
    }

    for style in tree.elements_by_tag_name(root, "style") {
        tree.detach(style);
    }

    if let Some(body) = tree.body() {
        replace_brs(tree, body);
    }

    for font in tree.elements_by_tag_name(root, "font") {
        tree.set_tag_name(font, "span");
    }
}

/// Replaces each run of two or more `<br>` (blank text in between ignored)
/// with a `<p>` that takes in the phrasing content following the run, up to
/// the next run.
///
/// `<div>foo<br>bar<br> <br><br>abc</div>` becomes
/// `<div>foo<br>bar<p>abc</p></div>`.
pub fn replace_brs(tree: &mut Tree, elem: NodeId) {
    for br in tree.elements_by_tag_name(elem, "br") {
        let mut next = tree.next_sibling(br);
        let mut replaced = false;

        // Drop every <br> after the first one in the chain.
        loop {
            next = tree.next_element(next);
            match next {
                Some(n) if tree.is_tag(n, "br") => {
                    replaced = true;
                    let sibling = tree.next_sibling(n);
                    tree.detach(n);
                    next = sibling;
                }
                _ => break,
            }
        }

        if !replaced {
            continue;
        }

        let p = tree.create_element("p");
        tree.replace_node(br, p);

        let mut next = tree.next_sibling(p);
        while let Some(n) = next {
            if tree.is_tag(n, "br") {
                let after = tree.next_element(tree.next_sibling(n));
                if after.is_some_and(|a| tree.is_tag(a, "br")) {
                    break;
                }
            }
            if !tree.is_phrasing_content(n) {
                break;
            }
            let sibling = tree.next_sibling(n);
            tree.append_child(p, n);
            next = sibling;
        }

        trim_trailing_whitespace(tree, p);

        if let Some(parent) = tree.parent(p) {
            if tree.is_tag(parent, "p") {
                tree.set_tag_name(parent, "div");
            }
        }
    }
}

fn trim_trailing_whitespace(tree: &mut Tree, id: NodeId) {
    while let Some(last) = tree.last_child(id) {
        if !tree.is_whitespace(last) {
            break;
        }
        tree.detach(last);
    }
}

/// Inline styles, `hidden` and `aria-hidden` say the node is not rendered.
/// Wikimedia math fallbacks stay visible despite `aria-hidden`.
#[must_use]
pub fn is_probably_visible(tree: &Tree, id: NodeId) -> bool {
    let style = tree.attr(id, "style").unwrap_or_default();
    let aria_hidden = tree.attr(id, "aria-hidden").unwrap_or_default();

    !DISPLAY_NONE.is_match(&style)
        && !VISIBILITY_HIDDEN.is_match(&style)
        && !tree.has_attr(id, "hidden")
        && (aria_hidden != "true" || tree.class_name(id).contains("fallback-image"))
}

/// Records the node's text as the byline and reports whether the node should
/// be removed. Only the first byline of the page is taken.
fn check_byline(tree: &Tree, id: NodeId, match_string: &str, facts: &mut PageFacts) -> bool {
    if facts.byline.is_some() {
        return false;
    }

    let rel = tree.attr(id, "rel").unwrap_or_default();
    let itemprop = tree.attr(id, "itemprop").unwrap_or_default();
    if rel != "author" && !itemprop.contains("author") && !is_byline(match_string) {
        return false;
    }

    // Length is measured before normalization.
    let text = tree.inner_text(id, false);
    let chars = char_count(&text);
    if chars > 0 && chars < MAX_BYLINE_CHARS {
        facts.byline = Some(normalize_whitespace(&text));
        return true;
    }
    false
}

fn header_duplicates_title(tree: &Tree, id: NodeId, title: &str) -> bool {
    if !(tree.is_tag(id, "h1") || tree.is_tag(id, "h2")) {
        return false;
    }
    let heading = tree.inner_text(id, false);
    text_similarity(title, &heading) > TITLE_SIMILARITY
}

/// Moves each run of phrasing children of `div` into a new `<p>`. Runs never
/// start with blank text, and a run closed by a block element loses its
/// trailing whitespace.
fn wrap_phrasing_runs(tree: &mut Tree, div: NodeId) {
    let mut paragraph: Option<NodeId> = None;
    let mut child = tree.first_child(div);

    while let Some(c) = child {
        let next = tree.next_sibling(c);
        if tree.is_phrasing_content(c) {
            if let Some(p) = paragraph {
                tree.append_child(p, c);
            } else if !tree.is_whitespace(c) {
                let p = tree.create_element("p");
                tree.insert_before(c, p);
                tree.append_child(p, c);
                paragraph = Some(p);
            }
        } else if let Some(p) = paragraph.take() {
            trim_trailing_whitespace(tree, p);
        }
        child = next;
    }
}

/// Walks the page from `<html>` and prunes it in place, returning the elements
/// to score in document order.
///
/// Along the way this removes:
/// - invisible nodes and modal dialogs;
/// - the byline node (recorded in `facts`);
/// - the first heading that repeats the title;
/// - unlikely candidates and boilerplate roles (only with `strip_unlikelys`);
/// - empty wrappers.
///
/// A `<div>` that only wraps one low-link `<p>` is replaced by it. A `<div>`
/// with no block-level content becomes a `<p>`.
pub fn collect_elements_to_score(
    tree: &mut Tree,
    options: &Options,
    flags: Flags,
    title: &str,
    facts: &mut PageFacts,
) -> Vec<NodeId> {
    let mut elements = Vec::new();
    let mut should_remove_title_header = true;
    let mut node = tree.document_element();

    while let Some(id) = node {
        let match_string = tree.match_string(id);
        let tag = tree.tag_name(id);

        if tag == "html" {
            facts.lang = tree.attr(id, "lang");
        }

        if !is_probably_visible(tree, id) {
            debug_log!(options, "removing hidden node: {match_string:?}");
            node = tree.remove_and_advance(id);
            continue;
        }

        if tree.attr(id, "aria-modal").as_deref() == Some("true")
            && tree.attr(id, "role").as_deref() == Some("dialog")
        {
            node = tree.remove_and_advance(id);
            continue;
        }

        if check_byline(tree, id, &match_string, facts) {
            node = tree.remove_and_advance(id);
            continue;
        }

        if should_remove_title_header && header_duplicates_title(tree, id, title) {
            debug_log!(options, "removing header duplicating title: {:?}", tree.inner_text(id, true));
            should_remove_title_header = false;
            node = tree.remove_and_advance(id);
            continue;
        }

        if flags.strip_unlikelys {
            if is_unlikely_candidate(&match_string)
                && !maybe_its_a_candidate(&match_string)
                && !tree.has_ancestor_tag(id, "table", 3, None)
                && !tree.has_ancestor_tag(id, "code", 3, None)
                && tag != "body"
                && tag != "a"
            {
                debug_log!(options, "removing unlikely candidate: {match_string:?}");
                node = tree.remove_and_advance(id);
                continue;
            }

            if let Some(role) = tree.attr(id, "role") {
                if is_unlikely_role(&role) {
                    debug_log!(options, "removing content with role {role:?}: {match_string:?}");
                    node = tree.remove_and_advance(id);
                    continue;
                }
            }
        }

        if (matches!(tag.as_str(), "div" | "section" | "header") || is_heading(&tag))
            && tree.is_element_without_content(id)
        {
            node = tree.remove_and_advance(id);
            continue;
        }

        if options.is_tag_to_score(&tag) {
            elements.push(id);
        }

        let mut current = id;
        if tag == "div" {
            wrap_phrasing_runs(tree, id);

            if tree.has_single_tag_inside(id, "p") && link_density(tree, id) < 0.25 {
                if let Some(p) = tree.first_element_child(id) {
                    let div_id = tree.id_attr(id);
                    let div_class = tree.class_name(id);
                    tree.replace_node(id, p);
                    if !div_id.is_empty() && tree.id_attr(p).is_empty() {
                        tree.set_attr(p, "id", &div_id);
                    }
                    if !div_class.is_empty() && tree.class_name(p).is_empty() {
                        tree.set_attr(p, "class", &div_class);
                    }
                    elements.push(p);
                    current = p;
                }
            } else if !tree.has_child_block_element(id) {
                tree.set_tag_name(id, "p");
                elements.push(id);
            }
        }

        node = tree.depth_first_next(current, false);
    }

    elements
}
