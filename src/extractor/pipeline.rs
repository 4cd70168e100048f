//! Content extraction pipeline.
//!
//! One pass runs on a fresh copy of the document: prep, prune and collect,
//! score, pick the root, gather siblings, clean. A pass whose article is
//! shorter than `char_threshold` is kept as an attempt and the next pass runs
//! with one heuristic fewer. When the ladder runs out, the longest attempt
//! wins.

use crate::dom::{NodeId, Tree};
use crate::options::Options;
use crate::scoring::{rescale_by_link_density, score_elements, ScoreTable};
use crate::text::count_chars_and_commas;

use super::candidates::{gather_siblings, rank_candidates, select_top_candidate};
use super::cleaning::Cleaner;
use super::prep::{collect_elements_to_score, prep_document};
use super::state::{best_attempt, Attempt, Flags, PageFacts, RetryStage};

/// `id` of the page container wrapped around the article.
pub const PAGE_ID: &str = "readability-page-1";

/// `class` of the page container.
pub const PAGE_CLASS: &str = "page";

/// Finds the article in `source`, relaxing heuristics until one pass yields
/// enough text.
///
/// `title` is used to spot a heading that repeats it. `facts` carries the
/// byline and language across passes and back to the caller.
///
/// Returns `None` when every pass came back empty.
pub fn grab_article(
    source: &Tree,
    options: &Options,
    title: &str,
    facts: &mut PageFacts,
) -> Option<Attempt> {
    let mut stage = RetryStage::AllStrict;
    let mut attempts = Vec::new();

    while let Some(flags) = stage.flags() {
        let attempt = run_pass(source, options, flags, title, facts);
        debug_log!(
            options,
            "pass {stage:?} found {} chars (threshold {})",
            attempt.text_length,
            options.char_threshold
        );

        if attempt.text_length >= options.char_threshold {
            return Some(attempt);
        }
        attempts.push(attempt);
        stage = stage.next();
    }

    let best = best_attempt(attempts);
    if best.is_none() {
        debug_log!(options, "no pass found any text");
    }
    best
}

/// One extraction pass with fixed flags.
fn run_pass(
    source: &Tree,
    options: &Options,
    flags: Flags,
    title: &str,
    facts: &mut PageFacts,
) -> Attempt {
    let mut tree = source.clone();
    prep_document(&mut tree);

    let elements = collect_elements_to_score(&mut tree, options, flags, title, facts);

    let mut scores = ScoreTable::new();
    let candidates = score_elements(&tree, &elements, &mut scores, flags.use_weight_classes);
    rescale_by_link_density(&tree, &candidates, &mut scores);

    let ranked = rank_candidates(&candidates, &scores, options.n_top_candidates);
    let top = select_top_candidate(&mut tree, &ranked, &mut scores, flags.use_weight_classes);
    debug_log!(
        options,
        "top candidate {:?} <{}> scored {:.2}",
        top.node,
        tree.tag_name(top.node),
        scores.score(top.node)
    );

    let article = gather_siblings(&mut tree, top.node, &scores);
    Cleaner::new(options, flags).prep_article(&mut tree, article);
    wrap_page(&mut tree, article, top.synthesized);

    let (text_length, _) = count_chars_and_commas(&tree, article);
    Attempt {
        tree,
        content: article,
        text_length,
    }
}

/// Gives the article its page container. A synthesized root already is one
/// and only gets labelled.
fn wrap_page(tree: &mut Tree, article: NodeId, synthesized: bool) {
    if synthesized {
        if let Some(first) = tree.first_element_child(article) {
            if tree.tag_name(first) == "div" {
                tree.set_attr(first, "id", PAGE_ID);
                tree.set_attr(first, "class", PAGE_CLASS);
            }
        }
        return;
    }

    let page = tree.create_element("div");
    tree.set_attr(page, "id", PAGE_ID);
    tree.set_attr(page, "class", PAGE_CLASS);
    while let Some(child) = tree.first_child(article) {
        tree.append_child(page, child);
    }
    tree.append_child(article, page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn paragraph(words: usize) -> String {
        format!("<p>{}</p>", "Lorem ipsum dolor sit amet, consectetur. ".repeat(words))
    }

    #[test]
    fn test_long_article_succeeds_on_first_pass() {
        let html = format!(
            r#"<html><body><nav class="sidebar"><a href="/">Home</a></nav>
               <div class="content">{}{}</div></body></html>"#,
            paragraph(8),
            paragraph(8)
        );
        let tree = parse(&html);
        let mut facts = PageFacts::default();
        let attempt = match grab_article(&tree, &Options::default(), "", &mut facts) {
            Some(a) => a,
            None => panic!("expected an article"),
        };
        assert!(attempt.text_length >= 500);

        let page = attempt
            .tree
            .first_element_child(attempt.content)
            .expect("page container");
        assert_eq!(attempt.tree.id_attr(page), PAGE_ID);
        assert_eq!(attempt.tree.class_name(page), PAGE_CLASS);
        assert!(!attempt.tree.text_content(attempt.content).contains("Home"));
    }

    #[test]
    fn test_short_page_returns_best_attempt() {
        let tree = parse("<div><p>Just a short note, with a comma here and there.</p></div>");
        let mut facts = PageFacts::default();
        let attempt = grab_article(&tree, &Options::default(), "", &mut facts);
        let attempt = attempt.expect("best attempt");
        assert!(attempt.text_length > 0);
        assert!(attempt.text_length < 500);
        assert!(attempt
            .tree
            .text_content(attempt.content)
            .contains("short note"));
    }

    #[test]
    fn test_empty_page_has_no_article() {
        let tree = parse("<html><body></body></html>");
        let mut facts = PageFacts::default();
        assert!(grab_article(&tree, &Options::default(), "", &mut facts).is_none());
    }

    #[test]
    fn test_source_tree_is_untouched() {
        let html = format!("<div class=content>{}</div>", paragraph(3));
        let tree = parse(&html);
        let before = tree.html();
        let mut facts = PageFacts::default();
        let _ = grab_article(&tree, &Options::default(), "", &mut facts);
        assert_eq!(tree.html(), before);
    }

    #[test]
    fn test_synthesized_root_is_labelled() {
        let mut tree = Tree::new();
        let article = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(article, inner);
        wrap_page(&mut tree, article, true);
        assert_eq!(tree.id_attr(inner), PAGE_ID);
        assert_eq!(tree.children(article).count(), 1);
    }
}
