//! Structural predicates over nodes.

use super::{NodeId, Tree};
use crate::extractor::tags::{DIV_TO_P_ELEM_SET, PHRASING_ELEM_SET};
use crate::text::normalize_whitespace;

impl Tree {
    /// A text node with at least one non-whitespace character.
    #[must_use]
    pub fn has_text_content(&self, id: NodeId) -> bool {
        self.is_text(id) && self.text(id).is_some_and(|t| !t.trim().is_empty())
    }

    /// A text node whose last character is not ASCII whitespace. Text that
    /// only trails off in spaces or newlines does not count.
    #[must_use]
    pub fn ends_in_content(&self, id: NodeId) -> bool {
        self.is_text(id)
            && self
                .text(id)
                .and_then(|t| t.chars().next_back())
                .is_some_and(|c| !c.is_ascii_whitespace())
    }

    /// Blank text or a `<br>`.
    #[must_use]
    pub fn is_whitespace(&self, id: NodeId) -> bool {
        if self.is_text(id) {
            return self.text(id).is_none_or(|t| t.trim().is_empty());
        }
        self.is_tag(id, "br")
    }

    /// Text, an inline element, or an `a`/`del`/`ins` whose children are all
    /// phrasing content themselves.
    #[must_use]
    pub fn is_phrasing_content(&self, id: NodeId) -> bool {
        if self.is_text(id) {
            return true;
        }
        let tag = self.tag_name(id);
        PHRASING_ELEM_SET.contains(tag.as_str())
            || (matches!(tag.as_str(), "a" | "del" | "ins")
                && self.children(id).all(|c| self.is_phrasing_content(c)))
    }

    /// True when the only element child is a `tag` and no child text node
    /// ends in a non-whitespace character.
    #[must_use]
    pub fn has_single_tag_inside(&self, id: NodeId, tag: &str) -> bool {
        let mut elements = self.element_children(id);
        let (Some(only), None) = (elements.next(), elements.next()) else {
            return false;
        };
        if !self.is_tag(only, tag) {
            return false;
        }
        !self.children(id).any(|c| self.ends_in_content(c))
    }

    /// An element whose direct children are only blank text, `<br>` or `<hr>`.
    #[must_use]
    pub fn is_element_without_content(&self, id: NodeId) -> bool {
        if !self.is_element(id) {
            return false;
        }
        self.children(id).all(|child| {
            if self.is_text(child) {
                self.text(child).is_none_or(|t| t.trim().is_empty())
            } else if self.is_element(child) {
                self.is_tag(child, "br") || self.is_tag(child, "hr")
            } else {
                true
            }
        })
    }

    /// Any descendant is a block-level element.
    #[must_use]
    pub fn has_child_block_element(&self, id: NodeId) -> bool {
        self.descendants(id)
            .any(|n| self.is_element(n) && DIV_TO_P_ELEM_SET.contains(self.tag_name(n).as_str()))
    }

    /// Walks up from `id` looking for an ancestor named `tag` that also passes
    /// `filter`. `max_depth == 0` means no depth limit.
    #[must_use]
    pub fn has_ancestor_tag(
        &self,
        id: NodeId,
        tag: &str,
        max_depth: usize,
        filter: Option<&dyn Fn(NodeId) -> bool>,
    ) -> bool {
        let mut depth = 0;
        let mut node = id;
        while let Some(parent) = self.parent(node) {
            if max_depth > 0 && depth > max_depth {
                return false;
            }
            if self.is_tag(parent, tag) && filter.is_none_or(|f| f(parent)) {
                return true;
            }
            node = parent;
            depth += 1;
        }
        false
    }

    /// Trimmed text content, optionally with whitespace runs collapsed.
    #[must_use]
    pub fn inner_text(&self, id: NodeId, normalize_spaces: bool) -> String {
        let text = self.text_content(id);
        if normalize_spaces {
            normalize_whitespace(&text)
        } else {
            text.trim().to_string()
        }
    }
}
