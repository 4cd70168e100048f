//! # rs-readability
//!
//! Reader-mode content extraction: finds the main article of a web page and
//! returns it cleaned of navigation, ads and other boilerplate, together with
//! its metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::extract;
//!
//! let paragraph = "<p>Main content here, with enough words and commas to count.</p>";
//! let html = format!(
//!     "<html><head><title>My Article</title></head><body><article>{}</article></body></html>",
//!     paragraph.repeat(10)
//! );
//!
//! let article = extract(&html)?;
//! println!("Title: {:?}", article.metadata.title);
//! println!("Content: {}", article.text_content);
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! ## How it works
//!
//! - **Scoring**: paragraphs score by length and commas, and pass that score
//!   up to their parent and grandparent
//! - **Selection**: the best-scoring container is picked, together with
//!   related siblings
//! - **Cleanup**: forms, share widgets, link farms and empty markup are
//!   removed from the result
//! - **Retries**: short results are retried with fewer heuristics, and the
//!   longest attempt wins
//!
//! Use [`is_probably_readerable`] for a cheap check before extracting.

#[macro_use]
mod macros;

mod error;
mod extract;
mod options;
mod result;

/// Arena document tree and the HTML parsing front-end.
pub mod dom;

/// Regex catalog and class/id classifier predicates.
pub mod patterns;

/// Text measurement helpers.
pub mod text;

/// Link density of subtrees.
pub mod link_density;

/// Content scores and class weights.
pub mod scoring;

/// Extraction passes: preparation, candidate selection, cleanup, retries.
pub mod extractor;

/// Metadata extraction (title, meta tags, JSON-LD, favicon).
pub mod metadata;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Cheap readability pre-check.
pub mod readerable;

// Public API - re-exports
pub use dom::{NodeId, Tree};
pub use error::{Error, Result};
pub use extract::{extract_tree, remove_scripts, unwrap_noscript_images};
pub use options::Options;
pub use readerable::is_probably_readerable;
pub use result::{Article, Metadata};

/// Extracts the article from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract, Error};
///
/// match extract("<html><body></body></html>") {
///     Err(Error::NoContent) => {}
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<Article> {
    extract_with_options(html, &Options::default())
}

/// Extracts the article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract_with_options, Options};
///
/// let html = format!("<div><p>{}</p></div>", "Some words, and more words. ".repeat(30));
/// let options = Options {
///     url: Some("https://example.com/posts/1".to_string()),
///     char_threshold: 250,
///     ..Options::default()
/// };
/// let article = extract_with_options(&html, &options)?;
/// assert!(article.length > 250);
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<Article> {
    extract::extract_content(html, options)
}

/// Extracts the article from HTML bytes with automatic encoding detection.
///
/// # Character Encoding
///
/// The encoding is taken from:
/// - a byte order mark
/// - `<meta charset="...">`
/// - `<meta http-equiv="Content-Type" content="...; charset=...">`
/// - UTF-8 if none is found
///
/// Invalid characters are replaced with � (Unicode replacement character)
/// rather than causing errors.
///
/// # Example
///
/// ```rust
/// use rs_readability::extract_bytes;
///
/// let mut html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div><p>Caf\xE9".to_vec();
/// html.extend(b", and more words to read. ".repeat(25));
/// html.extend(b"</p></div></body></html>");
///
/// let article = extract_bytes(&html)?;
/// assert!(article.text_content.contains("Café"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(html: &[u8]) -> Result<Article> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts the article from HTML bytes with custom options and automatic
/// encoding detection.
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<Article> {
    let html = encoding::decode_html(html)?;
    extract_with_options(&html, options)
}
