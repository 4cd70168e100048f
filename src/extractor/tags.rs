//! Tag and attribute catalogs used by the extraction passes.
//!
//! Each list is kept as an array (for iteration in a fixed order) and, where
//! it is consulted per node, as a `HashSet` for O(1) lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Tags scored by default: section, h2-h6, p, td, pre
pub static DEFAULT_TAGS_TO_SCORE: [&str; 9] = ["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// ARIA roles that mark boilerplate regions.
pub static UNLIKELY_ROLES: [&str; 7] = [
    "menu",
    "menubar",
    "complementary",
    "navigation",
    "alert",
    "alertdialog",
    "dialog",
];

/// Block-level children that keep a `<div>` from being turned into a `<p>`.
pub static DIV_TO_P_ELEMS: [&str; 10] = [
    "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul", "select",
];

/// Sibling tags merged into the article as-is; anything else becomes a `div`.
pub static ALTER_TO_DIV_EXCEPTIONS: [&str; 4] = ["div", "article", "section", "p"];

/// Inline presentational attributes stripped from article content.
pub static PRESENTATIONAL_ATTRIBUTES: [&str; 12] = [
    "align",
    "background",
    "bgcolor",
    "border",
    "cellpadding",
    "cellspacing",
    "frame",
    "hspace",
    "rules",
    "style",
    "valign",
    "vspace",
];

/// Elements whose deprecated `width`/`height` attributes are stripped.
pub static DEPRECATED_SIZE_ATTRIBUTE_ELEMS: [&str; 5] = ["table", "th", "td", "hr", "pre"];

/// Inline-level elements that may be wrapped into a paragraph.
pub static PHRASING_ELEMS: [&str; 39] = [
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn", "em",
    "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "var", "wbr",
];

/// Heading tags h1-h6
pub static HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `UNLIKELY_ROLES` as a `HashSet`
pub static UNLIKELY_ROLE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| UNLIKELY_ROLES.into_iter().collect());

/// `DIV_TO_P_ELEMS` as a `HashSet`
pub static DIV_TO_P_ELEM_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DIV_TO_P_ELEMS.into_iter().collect());

/// `PHRASING_ELEMS` as a `HashSet`
pub static PHRASING_ELEM_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PHRASING_ELEMS.into_iter().collect());

// === Helper Functions ===

#[inline]
#[must_use]
pub fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_unlikely_role(role: &str) -> bool {
    UNLIKELY_ROLE_SET.contains(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sizes_match_arrays() {
        assert_eq!(UNLIKELY_ROLE_SET.len(), UNLIKELY_ROLES.len());
        assert_eq!(DIV_TO_P_ELEM_SET.len(), DIV_TO_P_ELEMS.len());
        assert_eq!(PHRASING_ELEM_SET.len(), PHRASING_ELEMS.len());
    }

    #[test]
    fn test_is_heading() {
        assert!(is_heading("h1"));
        assert!(is_heading("h6"));
        assert!(!is_heading("header"));
    }

    #[test]
    fn test_unlikely_roles() {
        assert!(is_unlikely_role("navigation"));
        assert!(is_unlikely_role("dialog"));
        assert!(!is_unlikely_role("main"));
        assert!(!is_unlikely_role(""));
    }
}
