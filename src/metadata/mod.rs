//! Metadata extraction module.
//!
//! Metadata is read from the untouched document, independently of the
//! extraction passes: JSON-LD first, then `<meta>` tags, then the `<title>`
//! heuristics for the title.

pub mod favicon;
pub mod json_ld;
pub mod meta_tags;
pub mod title;

use url::Url;

use crate::dom::Tree;
use crate::result::Metadata;
use crate::text::unescape_html;

pub use favicon::favicon;
pub use json_ld::{extract_json_ld, JsonLd};
pub use meta_tags::{collect_meta_values, parse_date, MetaValues};
pub use title::article_title;

const TITLE_KEYS: &[&str] = &[
    "dc:title",
    "dcterm:title",
    "og:title",
    "weibo:article:title",
    "weibo:webpage:title",
    "title",
    "twitter:title",
    "parsely-title",
];

const BYLINE_KEYS: &[&str] = &["dc:creator", "dcterm:creator", "author", "parsely-author"];

const EXCERPT_KEYS: &[&str] = &[
    "dc:description",
    "dcterm:description",
    "og:description",
    "weibo:article:description",
    "weibo:webpage:description",
    "description",
    "twitter:description",
];

const IMAGE_KEYS: &[&str] = &["og:image", "image", "twitter:image"];

const PUBLISHED_KEYS: &[&str] = &[
    "article:published_time",
    "dcterms:available",
    "dcterms:created",
    "dcterms:issued",
    "weibo:article:create_at",
    "parsely-pub-date",
];

const MODIFIED_KEYS: &[&str] = &["article:modified_time", "dcterms:modified"];

/// Extract document metadata.
///
/// # Arguments
/// * `tree` - The parsed document, before scripts are removed
/// * `json_ld` - JSON-LD fields, which take precedence over meta tags
/// * `page_title` - Result of [`article_title`], the last resort for the title
/// * `base` - Document URL for the favicon
///
/// Values are HTML-unescaped. Empty values come back as `None`. Language is
/// not set here; it comes from the extraction walk.
#[must_use]
pub fn extract_metadata(
    tree: &Tree,
    json_ld: Option<&JsonLd>,
    page_title: &str,
    base: Option<&Url>,
) -> Metadata {
    let values = collect_meta_values(tree);
    let ld = json_ld.cloned().unwrap_or_default();

    let title = pick(ld.title.as_deref(), &values, TITLE_KEYS)
        .or_else(|| Some(unescape_html(page_title)).filter(|t| !t.is_empty()));
    let published = pick(ld.date_published.as_deref(), &values, PUBLISHED_KEYS);
    let modified = pick(ld.date_modified.as_deref(), &values, MODIFIED_KEYS);

    Metadata {
        title,
        byline: pick(ld.byline.as_deref(), &values, BYLINE_KEYS),
        excerpt: pick(ld.excerpt.as_deref(), &values, EXCERPT_KEYS),
        site_name: pick(ld.site_name.as_deref(), &values, &["og:site_name"]),
        image: values.first_of(IMAGE_KEYS).map(str::to_string),
        favicon: favicon(tree, base),
        language: None,
        published_time: published.as_deref().and_then(parse_date),
        modified_time: modified.as_deref().and_then(parse_date),
    }
}

/// The JSON-LD value if present, else the first meta value among `keys`.
fn pick(from_ld: Option<&str>, values: &MetaValues, keys: &[&str]) -> Option<String> {
    from_ld
        .filter(|v| !v.is_empty())
        .or_else(|| values.first_of(keys))
        .map(unescape_html)
        .filter(|v| !v.is_empty())
}
