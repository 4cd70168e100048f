//! Text measurement helpers.
//!
//! Lengths are counted in `char`s (Unicode scalar values), never bytes, and as
//! if the text had been whitespace-normalized and trimmed first. The counters
//! work one `char` at a time so subtree walks never need to build the
//! normalized string.

use dom_query::Document;

use crate::dom::{NodeId, Tree};
use crate::patterns::TOKENIZE_RE;

/// Comma-like punctuation across scripts.
const COMMAS: [char; 9] = [
    '\u{002C}', // ,
    '\u{060C}', // ،
    '\u{FE50}', // ﹐
    '\u{FE10}', // ︐
    '\u{FE11}', // ︑
    '\u{2E41}', // ⹁
    '\u{2E34}', // ⸴
    '\u{2E32}', // ⸲
    '\u{FF0C}', // ，
];

/// Counts chars as they would appear after collapsing each whitespace run to a
/// single space and trimming both ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharCounter {
    pub total: usize,
    seen_text: bool,
    pending_space: bool,
}

impl CharCounter {
    pub fn count(&mut self, c: char) {
        if c.is_whitespace() {
            if self.seen_text {
                self.pending_space = true;
            }
            return;
        }
        if self.pending_space {
            self.total += 1;
            self.pending_space = false;
        }
        self.total += 1;
        self.seen_text = true;
    }

    pub fn count_str(&mut self, s: &str) {
        for c in s.chars() {
            self.count(c);
        }
    }

    /// Starts a new trimming context without losing the running total, so
    /// text in separate regions is not joined by a counted space.
    pub fn reset_context(&mut self) {
        self.seen_text = false;
        self.pending_space = false;
    }
}

#[inline]
#[must_use]
pub fn is_comma(c: char) -> bool {
    COMMAS.contains(&c)
}

/// Normalized char count and comma count of all text under `id`.
#[must_use]
pub fn count_chars_and_commas(tree: &Tree, id: NodeId) -> (usize, usize) {
    let mut chars = CharCounter::default();
    let mut commas = 0;
    let mut visit = |text: &str| {
        for c in text.chars() {
            chars.count(c);
            if is_comma(c) {
                commas += 1;
            }
        }
    };
    for node in std::iter::once(id).chain(tree.descendants(id)) {
        if let Some(text) = tree.text(node).filter(|_| tree.is_text(node)) {
            visit(&text);
        }
    }
    (chars.total, commas)
}

/// Number of `char`s in `s`.
#[inline]
#[must_use]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Collapses whitespace runs to one space and trims.
#[must_use]
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// How much of `b` is already covered by `a`: 1 for the same words, 0 for
/// none in common. Compares lowercase word tokens.
#[must_use]
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: std::collections::HashSet<&str> =
        TOKENIZE_RE.split(&a).filter(|t| !t.is_empty()).collect();
    let tokens_b: Vec<&str> = TOKENIZE_RE.split(&b).filter(|t| !t.is_empty()).collect();
    if tokens_b.is_empty() {
        return 0.0;
    }
    let unique_b: Vec<&str> = tokens_b
        .iter()
        .copied()
        .filter(|t| !tokens_a.contains(t))
        .collect();

    let merged_b = char_count(&tokens_b.join(" "));
    let merged_unique_b = char_count(&unique_b.join(" "));
    1.0 - merged_unique_b as f64 / merged_b as f64
}

/// Decodes character references in one pass, so `&amp;lt;` yields `&lt;`.
/// Unknown names are left as written.
///
/// Decoding goes through the HTML tokenizer, which knows every named
/// reference. `<` is escaped first so the input is only ever read as text.
#[must_use]
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let fragment = Document::fragment(s.replace('<', "&lt;"));
    fragment.root().text().to_string()
}
