//! Mutable document tree over `dom_query`.
//!
//! [`Tree`] wraps a parsed [`dom_query::Document`] and addresses nodes by
//! [`NodeId`]. Every method takes and returns ids, so callers can hold many
//! node handles while mutating the tree without fighting the borrow checker.
//!
//! Cloning a [`Tree`] copies the underlying node store as a whole, so a `NodeId`
//! taken from the original names the same node in the copy. Extraction passes
//! rely on this: each pass mutates a private clone and keys its scratch tables
//! by `NodeId`.

mod parse;
mod predicates;
mod serialize;
mod traverse;

use std::fmt;

use dom_query::{Document, NodeData, NodeRef};
use html5ever::QualName;
use tendril::StrTendril;

pub use dom_query::NodeId;
pub use parse::{from_document, parse};
pub use traverse::Descendants;

/// A single element attribute, with any namespace prefix kept in `name`
/// (`xlink:href`). Names are unique within one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Attribute name as written in markup.
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

fn name_matches(name: &QualName, wanted: &str) -> bool {
    match &name.prefix {
        Some(prefix) => wanted
            .split_once(':')
            .is_some_and(|(p, local)| p == &**prefix && local == &*name.local),
        None => &*name.local == wanted,
    }
}

/// Mutable HTML document tree.
#[derive(Clone, Default)]
pub struct Tree {
    doc: Document,
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("elements", &self.count_elements())
            .finish_non_exhaustive()
    }
}

impl From<Document> for Tree {
    fn from(doc: Document) -> Self {
        Self { doc }
    }
}

impl Tree {
    /// Creates a tree holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying `dom_query` document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.doc.tree.root_id()
    }

    fn node(&self, id: NodeId) -> NodeRef<'_> {
        self.doc.tree.get_unchecked(&id)
    }

    /// Creates a detached element with no attributes.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.doc.tree.new_element(&name.to_ascii_lowercase()).id
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.doc.tree.new_text(text).id
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent().map(|n| n.id)
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child().map(|n| n.id)
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child().map(|n| n.id)
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling().map(|n| n.id)
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling().map(|n| n.id)
    }

    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_element()
    }

    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        self.node(id).is_text()
    }

    #[must_use]
    pub fn is_comment(&self, id: NodeId) -> bool {
        self.node(id).is_comment()
    }

    /// Lowercase tag name, or `""` for anything that is not an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> String {
        self.node(id)
            .node_name()
            .map(|name| name.to_string())
            .unwrap_or_default()
    }

    /// True when `id` is an element named `tag`. Cheaper than comparing
    /// against [`tag_name`](Self::tag_name) since nothing is allocated.
    #[must_use]
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.node(id).has_name(tag)
    }

    /// Renames an element in place, keeping its attributes and children.
    pub fn set_tag_name(&mut self, id: NodeId, name: &str) {
        self.node(id).rename(&name.to_ascii_lowercase());
    }

    /// Character data of a text or comment node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<String> {
        self.doc
            .tree
            .query_node(&id, |node| match &node.data {
                NodeData::Text { contents } | NodeData::Comment { contents } => {
                    Some(contents.to_string())
                }
                _ => None,
            })
            .flatten()
    }

    #[must_use]
    pub fn attrs(&self, id: NodeId) -> Vec<Attribute> {
        self.node(id)
            .element_ref()
            .map(|el| {
                el.attrs
                    .iter()
                    .map(|a| Attribute {
                        name: qualified_name(&a.name),
                        value: a.value.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.node(id).element_ref().and_then(|el| {
            el.attrs
                .iter()
                .find(|a| name_matches(&a.name, name))
                .map(|a| a.value.to_string())
        })
    }

    #[must_use]
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id)
            .element_ref()
            .is_some_and(|el| el.attrs.iter().any(|a| name_matches(&a.name, name)))
    }

    /// Sets an attribute, replacing the value if the name already exists.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.doc.tree.update_node(&id, |node| {
            let Some(el) = node.as_element_mut() else {
                return;
            };
            match el.attrs.iter_mut().find(|a| name_matches(&a.name, name)) {
                Some(existing) => existing.value = StrTendril::from(value).into_send().into(),
                None => el.set_attr(name, value),
            }
        });
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.doc.tree.update_node(&id, |node| {
            if let Some(el) = node.as_element_mut() {
                el.attrs.retain(|a| !name_matches(&a.name, name));
            }
        });
    }

    /// Value of `class`, or `""`.
    #[must_use]
    pub fn class_name(&self, id: NodeId) -> String {
        self.attr(id, "class").unwrap_or_default()
    }

    /// Value of `id`, or `""`.
    #[must_use]
    pub fn id_attr(&self, id: NodeId) -> String {
        self.attr(id, "id").unwrap_or_default()
    }

    /// `class + " " + id`, the string every class/id matcher runs against.
    #[must_use]
    pub fn match_string(&self, id: NodeId) -> String {
        format!("{} {}", self.class_name(id), self.id_attr(id))
    }

    /// Iterates over all child nodes, text and comments included.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterates over element children only.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(move |&c| self.is_element(c))
    }

    #[must_use]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_element_child().map(|n| n.id)
    }

    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_element_sibling().map(|n| n.id)
    }

    #[must_use]
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_element_sibling().map(|n| n.id)
    }

    /// Unlinks a node from its parent and siblings. The node keeps its own
    /// subtree. Detaching a parentless node does nothing.
    pub fn detach(&mut self, id: NodeId) {
        self.doc.tree.remove_from_parent(&id);
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.doc.tree.append_child_of(&parent, &child);
    }

    /// Moves `new` so it sits directly before `reference`. Does nothing if
    /// `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, new: NodeId) {
        if new == reference || self.parent(reference).is_none() {
            return;
        }
        self.doc.tree.insert_before_of(&reference, &new);
    }

    /// Puts `new` in `old`'s position and detaches `old`. `new` may currently
    /// live anywhere in the tree, including inside `old`.
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) {
        if old == new || self.parent(old).is_none() {
            return;
        }
        self.detach(new);
        self.insert_before(old, new);
        self.detach(old);
    }

    /// Ancestors from the parent upward. `max_depth == 0` walks to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId, max_depth: usize) -> Vec<NodeId> {
        let limit = (max_depth > 0).then_some(max_depth);
        self.doc.tree.ancestor_ids_of(&id, limit)
    }

    /// Descendant elements named `tag` in document order, excluding `root`.
    /// `"*"` matches every element.
    #[must_use]
    pub fn elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&n| {
                if tag == "*" {
                    self.is_element(n)
                } else {
                    self.is_tag(n, tag)
                }
            })
            .collect()
    }

    /// Elements for each tag in turn: all matches of the first tag, then all
    /// matches of the second, and so on.
    #[must_use]
    pub fn elements_by_tag_names(&self, root: NodeId, tags: &[&str]) -> Vec<NodeId> {
        tags.iter()
            .flat_map(|tag| self.elements_by_tag_name(root, tag))
            .collect()
    }

    /// Concatenated text of every descendant text node.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.node(id).text().to_string()
    }

    /// Number of elements reachable from the root.
    #[must_use]
    pub fn count_elements(&self) -> usize {
        self.descendants(self.root())
            .filter(|&n| self.is_element(n))
            .count()
    }

    /// The `<html>` element.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.first_element_child(self.root())
    }

    /// The first `<body>` element, if any.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root()).find(|&n| self.is_tag(n, "body"))
    }

    /// Deep-copies the subtree rooted at `other_id` of `other` into this tree.
    /// The copy is returned detached.
    pub fn import(&mut self, other: &Tree, other_id: NodeId) -> NodeId {
        let top = self.copy_node_data(other, other_id);
        let mut stack = vec![(other_id, top)];
        while let Some((src, dst)) = stack.pop() {
            for child in other.children(src) {
                let copy = self.copy_node_data(other, child);
                self.append_child(dst, copy);
                stack.push((child, copy));
            }
        }
        top
    }

    fn copy_node_data(&mut self, other: &Tree, id: NodeId) -> NodeId {
        let data = other
            .doc
            .tree
            .query_node(&id, |node| {
                let mut data = node.data.clone();
                if let NodeData::Element(el) = &mut data {
                    el.template_contents = None;
                }
                data
            })
            .unwrap_or(NodeData::Fragment);
        self.doc.tree.create_node(data)
    }

    /// A fresh, self-contained tree whose root holds a copy of `id`.
    #[must_use]
    pub fn fragment(&self, id: NodeId) -> Tree {
        let mut out = Tree::new();
        let copy = out.import(self, id);
        let root = out.root();
        out.append_child(root, copy);
        out
    }
}

/// Iterator over the child nodes of one node.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.root();
        let div = tree.create_element("div");
        tree.append_child(root, div);
        let a = tree.create_element("p");
        let b = tree.create_element("span");
        tree.append_child(div, a);
        tree.append_child(div, b);
        (tree, div, a, b)
    }

    #[test]
    fn test_append_links_siblings() {
        let (tree, div, a, b) = sample();
        assert_eq!(tree.first_child(div), Some(a));
        assert_eq!(tree.last_child(div), Some(b));
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.parent(a), Some(div));
    }

    #[test]
    fn test_detach_relinks_neighbours() {
        let (mut tree, div, a, b) = sample();
        tree.detach(a);
        assert_eq!(tree.first_child(div), Some(b));
        assert_eq!(tree.prev_sibling(b), None);
        assert_eq!(tree.parent(a), None);

        // Detaching again is a no-op.
        tree.detach(a);
        assert_eq!(tree.children(div).count(), 1);
    }

    #[test]
    fn test_replace_node_takes_position() {
        let (mut tree, div, a, b) = sample();
        let h = tree.create_element("h2");
        tree.replace_node(a, h);
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![h, b]);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_replace_node_with_own_child() {
        let (mut tree, div, a, _) = sample();
        let inner = tree.create_element("p");
        tree.append_child(a, inner);
        tree.replace_node(a, inner);
        assert_eq!(tree.first_child(div), Some(inner));
        assert_eq!(tree.first_child(a), None);
    }

    #[test]
    fn test_attributes_are_unique() {
        let (mut tree, div, ..) = sample();
        tree.set_attr(div, "class", "one");
        tree.set_attr(div, "class", "two");
        assert_eq!(tree.attrs(div).len(), 1);
        assert_eq!(tree.class_name(div), "two");
        tree.remove_attr(div, "class");
        assert!(!tree.has_attr(div, "class"));
        assert_eq!(tree.class_name(div), "");
    }

    #[test]
    fn test_namespaced_attributes_keep_their_prefix() {
        let mut tree = parse(
            r##"<svg><a xlink:href="#note" href="plain"><text>n</text></a></svg>"##,
        );
        let a = tree.elements_by_tag_name(tree.root(), "a")[0];
        let names: Vec<String> = tree.attrs(a).into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["xlink:href", "href"]);
        assert_eq!(tree.attr(a, "xlink:href").as_deref(), Some("#note"));
        assert_eq!(tree.attr(a, "href").as_deref(), Some("plain"));

        tree.set_attr(a, "href", "changed");
        assert_eq!(tree.attr(a, "xlink:href").as_deref(), Some("#note"));
        assert!(tree.outer_html(a).contains(r##"xlink:href="#note""##));

        tree.remove_attr(a, "xlink:href");
        assert!(!tree.has_attr(a, "xlink:href"));
        assert!(tree.has_attr(a, "href"));
    }

    #[test]
    fn test_clone_keeps_node_ids() {
        let (tree, _, a, _) = sample();
        let mut copy = tree.clone();
        copy.set_tag_name(a, "h1");
        assert_eq!(copy.tag_name(a), "h1");
        assert_eq!(tree.tag_name(a), "p");
    }

    #[test]
    fn test_fragment_copies_subtree_only() {
        let (mut tree, div, a, _) = sample();
        let text = tree.create_text("hello");
        tree.append_child(a, text);
        let frag = tree.fragment(a);
        let top = frag.first_child(frag.root()).expect("fragment root child");
        assert_eq!(frag.tag_name(top), "p");
        assert_eq!(frag.text_content(top), "hello");
        assert_eq!(frag.count_elements(), 1);
        assert_eq!(tree.children(div).count(), 2);
    }

    #[test]
    fn test_ancestors_depth_limit() {
        let (tree, div, a, _) = sample();
        assert_eq!(tree.ancestors(a, 1), vec![div]);
        assert_eq!(tree.ancestors(a, 0), vec![div, tree.root()]);
    }
}
