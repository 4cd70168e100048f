//! Extraction front-end.
//!
//! Takes a parsed document through the steps around the extraction passes:
//! limits, noscript images, JSON-LD, script removal, metadata, the passes
//! themselves, post-processing, and assembly of the [`Article`].

use url::Url;

use crate::dom::{self, NodeId, Tree};
use crate::error::{Error, Result};
use crate::extractor::cleaning::post_process;
use crate::extractor::{grab_article, PageFacts};
use crate::metadata::{article_title, extract_json_ld, extract_metadata};
use crate::options::Options;
use crate::patterns::IMG_EXTENSIONS;
use crate::result::Article;
use crate::text::{char_count, normalize_whitespace};
use crate::url_utils::parse_base_url;

/// Parse `html` and extract its article.
pub(crate) fn extract_content(html: &str, options: &Options) -> Result<Article> {
    let tree = dom::parse(html);
    extract_tree(&tree, options)
}

/// Extract the article of an already parsed document. `source` is not
/// modified.
///
/// # Errors
/// * `Error::InvalidUrl` when `options.url` is not an absolute URL
/// * `Error::NoContent` when there is no `<body>` or no pass found any text
/// * `Error::TooComplex` when the element count exceeds
///   `options.max_elems_to_parse`
pub fn extract_tree(source: &Tree, options: &Options) -> Result<Article> {
    let base = document_url(options)?;

    if source.body().is_none() {
        return Err(Error::NoContent);
    }

    if options.max_elems_to_parse > 0 {
        let count = source.count_elements();
        if count > options.max_elems_to_parse {
            return Err(Error::TooComplex {
                count,
                limit: options.max_elems_to_parse,
            });
        }
    }

    let mut tree = source.clone();
    unwrap_noscript_images(&mut tree);

    let page_title = article_title(&tree);
    let json_ld = if options.disable_json_ld {
        None
    } else {
        extract_json_ld(&tree, &page_title)
    };

    remove_scripts(&mut tree);

    let mut metadata = extract_metadata(&tree, json_ld.as_ref(), &page_title, base.as_ref());
    let title = metadata.title.clone().unwrap_or_default();
    debug_log!(options, "article title {title:?}");

    let mut facts = PageFacts::default();
    let Some(mut attempt) = grab_article(&tree, options, &title, &mut facts) else {
        return Err(Error::NoContent);
    };
    let article = attempt.content;
    post_process(&mut attempt.tree, article, options, base.as_ref());

    let tree = attempt.tree;
    let text_content = tree.text_content(article).trim().to_string();

    if metadata.excerpt.is_none() {
        metadata.excerpt = tree
            .elements_by_tag_name(article, "p")
            .first()
            .map(|&p| tree.text_content(p).trim().to_string())
            .filter(|e| !e.is_empty());
    }
    metadata.excerpt = metadata.excerpt.map(|e| normalize_whitespace(&e));

    if metadata.byline.is_none() {
        metadata.byline = facts.byline;
    }
    metadata.language = facts.lang;

    Ok(Article {
        content: tree.fragment(article),
        content_html: tree.inner_html(article),
        length: char_count(&text_content),
        text_content,
        metadata,
    })
}

/// `options.url` parsed, if set.
fn document_url(options: &Options) -> Result<Option<Url>> {
    match options.url.as_deref() {
        None => Ok(None),
        Some(url) => parse_base_url(url)
            .map(Some)
            .ok_or_else(|| Error::InvalidUrl(url.to_string())),
    }
}

/// An `<img>`, or an element whose only content is a chain of single
/// children ending in one.
fn is_single_image(tree: &Tree, id: NodeId) -> bool {
    if tree.is_tag(id, "img") {
        return true;
    }

    let mut children = tree.element_children(id);
    match (children.next(), children.next()) {
        (Some(only), None) => {
            tree.text_content(id).trim().is_empty() && is_single_image(tree, only)
        }
        _ => false,
    }
}

/// Whether an `<img>` carries anything that could be a source.
fn has_image_source(tree: &Tree, img: NodeId) -> bool {
    tree.attrs(img).iter().any(|a| {
        matches!(&*a.name, "src" | "data-src" | "srcset" | "data-srcset")
            || IMG_EXTENSIONS.is_match(&a.value)
    })
}

/// Replaces lazy-loading placeholders with the image from the `<noscript>`
/// right after them.
///
/// Source-less `<img>` elements are dropped first so a placeholder is never
/// chosen over a real image. Image attributes of the placeholder that differ
/// from the new image are kept, as `data-old-*` when the name is taken.
pub fn unwrap_noscript_images(tree: &mut Tree) {
    let root = tree.root();

    let placeholders: Vec<NodeId> = tree
        .elements_by_tag_name(root, "img")
        .into_iter()
        .filter(|&img| !has_image_source(tree, img))
        .collect();
    for img in placeholders {
        tree.detach(img);
    }

    for noscript in tree.elements_by_tag_name(root, "noscript") {
        let mut inner = dom::parse(&tree.inner_html(noscript));
        let Some(inner_body) = inner.body() else {
            continue;
        };
        if !is_single_image(&inner, inner_body) {
            continue;
        }

        let Some(prev) = tree.prev_element_sibling(noscript) else {
            continue;
        };
        if !is_single_image(tree, prev) {
            continue;
        }

        let prev_img = if tree.is_tag(prev, "img") {
            prev
        } else {
            match tree.elements_by_tag_name(prev, "img").first() {
                Some(&img) => img,
                None => continue,
            }
        };
        let Some(&new_img) = inner.elements_by_tag_name(inner_body, "img").first() else {
            continue;
        };

        for attr in tree.attrs(prev_img) {
            if attr.value.is_empty() {
                continue;
            }
            let is_image_attr = matches!(&*attr.name, "src" | "srcset")
                || IMG_EXTENSIONS.is_match(&attr.value);
            if !is_image_attr || inner.attr(new_img, &attr.name).as_deref() == Some(&*attr.value) {
                continue;
            }

            let name = if inner.has_attr(new_img, &attr.name) {
                format!("data-old-{}", attr.name)
            } else {
                attr.name.to_string()
            };
            inner.set_attr(new_img, &name, &attr.value);
        }

        let Some(replacement) = inner.first_element_child(inner_body) else {
            continue;
        };
        let imported = tree.import(&inner, replacement);
        tree.replace_node(prev, imported);
    }
}

/// Removes `<script>` and `<noscript>` elements.
pub fn remove_scripts(tree: &mut Tree) {
    for node in tree.elements_by_tag_names(tree.root(), &["script", "noscript"]) {
        tree.detach(node);
    }
}
