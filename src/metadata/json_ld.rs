//! JSON-LD Metadata Parsing
//!
//! Reads Schema.org article metadata from `<script type="application/ld+json">`.
//! Only the first script that describes an article is used.

use serde_json::{Map, Value};

use crate::dom::Tree;
use crate::patterns::{CDATA, JSON_LD_ARTICLE_TYPES, SCHEMA_ORG};
use crate::text::text_similarity;

/// Name and headline count as matching the page title above this similarity.
const TITLE_MATCH: f64 = 0.75;

/// Article fields found in JSON-LD. Values are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLd {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
}

/// Extract article metadata from JSON-LD scripts.
///
/// `page_title` is the cleaned `<title>`, used to choose between `name` and
/// `headline` when both are present and differ.
///
/// # Returns
/// * `Some` for the first script with a schema.org `@context` and an
///   article `@type` (directly or inside `@graph`), `None` otherwise
#[must_use]
pub fn extract_json_ld(tree: &Tree, page_title: &str) -> Option<JsonLd> {
    let scripts = tree
        .elements_by_tag_name(tree.root(), "script")
        .into_iter()
        .filter(|&s| tree.attr(s, "type").as_deref() == Some("application/ld+json"));

    for script in scripts {
        let content = tree.text_content(script);
        let content = CDATA.replace_all(&content, "");

        let parsed: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                log::trace!("skipping undecodable JSON-LD: {err}");
                continue;
            }
        };

        if let Some(article) = find_article(&parsed) {
            return Some(read_article(article, page_title));
        }
    }
    None
}

/// The article object: `parsed` itself, or the first article in its
/// `@graph` when it has no `@type` of its own.
fn find_article(parsed: &Map<String, Value>) -> Option<&Map<String, Value>> {
    let context = parsed.get("@context").and_then(Value::as_str)?;
    if !SCHEMA_ORG.is_match(context) {
        return None;
    }

    let article = if parsed.contains_key("@type") {
        parsed
    } else {
        parsed
            .get("@graph")
            .and_then(Value::as_array)?
            .iter()
            .filter_map(Value::as_object)
            .find(|obj| is_article_type(obj))?
    };

    is_article_type(article).then_some(article)
}

fn is_article_type(obj: &Map<String, Value>) -> bool {
    obj.get("@type")
        .and_then(Value::as_str)
        .is_some_and(|t| JSON_LD_ARTICLE_TYPES.is_match(t))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(|s| s.trim().to_string())
}

fn read_article(article: &Map<String, Value>, page_title: &str) -> JsonLd {
    let name = string_field(article, "name");
    let headline = string_field(article, "headline");

    // Some sites put their own name in "name" and the story in "headline".
    let title = match (name, headline) {
        (Some(name), Some(headline)) if name != headline => {
            let name_matches = text_similarity(&name, page_title) > TITLE_MATCH;
            let headline_matches = text_similarity(&headline, page_title) > TITLE_MATCH;
            if headline_matches && !name_matches {
                Some(headline)
            } else {
                Some(name)
            }
        }
        (Some(name), _) => Some(name),
        (None, headline) => headline,
    };

    let byline = match article.get("author") {
        Some(Value::Object(author)) => string_field(author, "name"),
        Some(Value::Array(authors)) => Some(
            authors
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|a| string_field(a, "name"))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    };

    let site_name = article
        .get("publisher")
        .and_then(Value::as_object)
        .and_then(|p| string_field(p, "name"));

    JsonLd {
        title,
        byline,
        excerpt: string_field(article, "description"),
        site_name,
        date_published: string_field(article, "datePublished"),
        date_modified: string_field(article, "dateModified"),
    }
}
