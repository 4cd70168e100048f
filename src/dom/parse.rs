//! Parsing HTML into a [`Tree`].

use dom_query::Document;

use super::Tree;

/// Parses an HTML string into a [`Tree`].
///
/// Parsing never fails: malformed markup is repaired by the HTML5 tree
/// builder, and the result always has `<html>`, `<head>` and `<body>`.
/// Scripting is off while parsing, so `<noscript>` content becomes elements.
#[must_use]
pub fn parse(html: &str) -> Tree {
    Tree::from(Document::from(html))
}

/// Wraps a copy of an already parsed `dom_query` document.
#[must_use]
pub fn from_document(document: &Document) -> Tree {
    Tree::from(document.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_document_skeleton() {
        let tree = parse("<p>hello</p>");
        let html = tree.document_element().expect("html element");
        assert_eq!(tree.tag_name(html), "html");
        assert!(tree.body().is_some());
        assert_eq!(tree.elements_by_tag_name(tree.root(), "head").len(), 1);
    }

    #[test]
    fn test_parse_keeps_attributes_and_order() {
        let tree = parse(r#"<div id="a" class="b"><span>1</span>2<em>3</em></div>"#);
        let div = tree.elements_by_tag_name(tree.root(), "div")[0];
        assert_eq!(tree.id_attr(div), "a");
        assert_eq!(tree.class_name(div), "b");
        assert_eq!(tree.text_content(div), "123");
        assert_eq!(tree.children(div).count(), 3);
    }

    #[test]
    fn test_parse_keeps_comments_out_of_text() {
        let tree = parse("<div>a<!-- note -->b</div>");
        let div = tree.elements_by_tag_name(tree.root(), "div")[0];
        let comment = tree.children(div).find(|&c| tree.is_comment(c));
        assert_eq!(comment.and_then(|c| tree.text(c)).as_deref(), Some(" note "));
        assert_eq!(tree.text_content(div), "ab");
    }

    #[test]
    fn test_doctype_is_not_the_document_element() {
        let tree = parse("<!DOCTYPE html><html><body><p>x</p></body></html>");
        let html = tree.document_element().expect("html element");
        assert_eq!(tree.tag_name(html), "html");
        assert!(tree.html().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_from_document_copies() {
        let document = Document::from("<p>one</p>");
        let mut tree = from_document(&document);
        let p = tree.elements_by_tag_name(tree.root(), "p")[0];
        tree.set_tag_name(p, "div");
        assert_eq!(document.select("p").nodes().len(), 1);
    }
}
