//! Depth-first traversal and delete-while-iterating helpers.

use super::{NodeId, Tree};

impl Tree {
    /// Returns `node` itself if it is an element or non-blank text, otherwise
    /// the first following sibling that is.
    #[must_use]
    pub fn next_element(&self, node: Option<NodeId>) -> Option<NodeId> {
        let mut next = node;
        while let Some(n) = next {
            if self.is_element(n) || self.has_text_content(n) {
                return Some(n);
            }
            next = self.next_sibling(n);
        }
        None
    }

    /// Next element in a pre-order walk: first element child (unless
    /// `skip_subtree`), else next element sibling, else the next element
    /// sibling of the nearest ancestor that has one.
    #[must_use]
    pub fn depth_first_next(&self, node: NodeId, skip_subtree: bool) -> Option<NodeId> {
        if !skip_subtree {
            if let Some(child) = self.first_element_child(node) {
                return Some(child);
            }
        }

        if let Some(sibling) = self.next_element_sibling(node) {
            return Some(sibling);
        }

        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            if let Some(sibling) = self.next_element_sibling(ancestor) {
                return Some(sibling);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// Detaches `node` and returns the node the walk should visit next. The
    /// successor is computed before the node is unlinked.
    pub fn remove_and_advance(&mut self, node: NodeId) -> Option<NodeId> {
        let next = self.depth_first_next(node, true);
        self.detach(node);
        next
    }

    /// Pre-order iterator over every node below `root`, excluding `root`.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.first_child(root),
        }
    }
}

/// Pre-order iterator over all nodes (any kind) inside a subtree.
pub struct Descendants<'a> {
    tree: &'a Tree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if let Some(child) = self.tree.first_child(current) {
            Some(child)
        } else {
            let mut node = current;
            loop {
                if node == self.root {
                    break None;
                }
                if let Some(sibling) = self.tree.next_sibling(node) {
                    break Some(sibling);
                }
                match self.tree.parent(node) {
                    Some(parent) if parent != self.root => node = parent,
                    _ => break None,
                }
            }
        };
        Some(current)
    }
}
