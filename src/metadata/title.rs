//! Document title cleanup.
//!
//! `<title>` usually carries the site name as well, as in
//! "Story headline | Site". The rules below strip that decoration while
//! refusing to cut a title down to a few words.

use crate::dom::Tree;
use crate::patterns::{
    TITLE_ANY_SEPARATOR, TITLE_HIERARCHY_SEP, TITLE_REMOVE_1ST_PART, TITLE_REMOVE_FINAL_PART,
    TITLE_SEPARATOR,
};
use crate::text::{char_count, normalize_whitespace, word_count};

/// The article title derived from `<title>`, falling back to a lone `<h1>`
/// when the title is very short or very long.
#[must_use]
pub fn article_title(tree: &Tree) -> String {
    let root = tree.root();
    let orig_title = tree
        .elements_by_tag_name(root, "title")
        .first()
        .map(|&t| tree.inner_text(t, true))
        .unwrap_or_default();

    let mut cur_title = orig_title.clone();
    let mut had_hierarchical_separators = false;

    if TITLE_SEPARATOR.is_match(&cur_title) {
        had_hierarchical_separators = TITLE_HIERARCHY_SEP.is_match(&cur_title);
        cur_title = TITLE_REMOVE_FINAL_PART
            .replace_all(&orig_title, "$1")
            .into_owned();

        if word_count(&cur_title) < 3 {
            cur_title = TITLE_REMOVE_1ST_PART
                .replace_all(&orig_title, "$1")
                .into_owned();
        }
    } else if cur_title.contains(": ") {
        // A heading with the exact text means the colon is part of the title.
        let trimmed = cur_title.trim();
        let heading_matches = tree
            .elements_by_tag_names(root, &["h1", "h2"])
            .into_iter()
            .any(|h| tree.text_content(h).trim() == trimmed);

        if !heading_matches {
            if let (Some(first), Some(last)) = (orig_title.find(':'), orig_title.rfind(':')) {
                cur_title = orig_title[last + 1..].to_string();
                if word_count(&cur_title) < 3 {
                    cur_title = orig_title[first + 1..].to_string();
                } else if word_count(&orig_title[..first]) > 5 {
                    // Too many words before the colon: keep it whole.
                    cur_title.clone_from(&orig_title);
                }
            }
        }
    } else {
        let chars = char_count(&cur_title);
        if chars > 150 || chars < 15 {
            let h1s = tree.elements_by_tag_name(root, "h1");
            if let [only] = h1s.as_slice() {
                cur_title = tree.inner_text(*only, true);
            }
        }
    }

    cur_title = normalize_whitespace(&cur_title);

    // Four words or fewer is only fine when the cut removed exactly one
    // hierarchical segment.
    let cur_words = word_count(&cur_title);
    let orig_words = word_count(&TITLE_ANY_SEPARATOR.replace_all(&orig_title, ""));
    if cur_words <= 4 && (!had_hierarchical_separators || cur_words + 1 != orig_words) {
        return orig_title;
    }

    cur_title
}
