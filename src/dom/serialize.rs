//! HTML serialization through the html5ever serializer.

use super::{NodeId, Tree};

impl Tree {
    /// Markup of the node itself and its subtree.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        self.doc
            .tree
            .get_unchecked(&id)
            .try_html()
            .map(|html| html.to_string())
            .unwrap_or_default()
    }

    /// Markup of the node's children.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        self.doc
            .tree
            .get_unchecked(&id)
            .try_inner_html()
            .map(|html| html.to_string())
            .unwrap_or_default()
    }

    /// Markup of the whole document.
    #[must_use]
    pub fn html(&self) -> String {
        self.doc
            .try_html()
            .map(|html| html.to_string())
            .unwrap_or_default()
    }
}
