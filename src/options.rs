//! Configuration options for content extraction.
//!
//! The `Options` struct controls how strict the extraction passes are, how
//! many candidates compete for the article root, and what survives cleanup.

use regex::Regex;

use crate::extractor::tags::DEFAULT_TAGS_TO_SCORE;

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_readability::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     char_threshold: 250,
///     keep_classes: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of elements to accept. Larger documents fail with
    /// `Error::TooComplex` before any pass runs. `0` disables the check.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// Number of top-scoring candidates compared when looking for a shared
    /// ancestor.
    ///
    /// Default: `5`
    pub n_top_candidates: usize,

    /// Minimum article length in characters for a pass to count as a success.
    /// Shorter results trigger the next, more lenient pass.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Classes kept when class attributes are stripped from the article.
    ///
    /// Default: `["page"]`
    pub classes_to_preserve: Vec<String>,

    /// Keep every class attribute in the article.
    ///
    /// Default: `false`
    pub keep_classes: bool,

    /// Tags whose text feeds the content score of their ancestors.
    ///
    /// Default: `section`, `h2`-`h6`, `p`, `td`, `pre`
    pub tags_to_score: Vec<String>,

    /// Replaces the built-in video host matcher. Embeds whose attributes (or,
    /// for `<object>`, inner markup) match are kept during cleanup.
    ///
    /// Default: `None`
    pub allowed_video_regex: Option<Regex>,

    /// Skip JSON-LD metadata.
    ///
    /// Default: `false`
    pub disable_json_ld: bool,

    /// Document URL, used to resolve relative links, images and the favicon.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Emit per-pass tracing through the `log` facade at debug level.
    ///
    /// Default: `false`
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_elems_to_parse: 0,
            n_top_candidates: 5,
            char_threshold: 500,
            classes_to_preserve: vec!["page".to_string()],
            keep_classes: false,
            tags_to_score: DEFAULT_TAGS_TO_SCORE.iter().map(|t| (*t).to_string()).collect(),
            allowed_video_regex: None,
            disable_json_ld: false,
            url: None,
            debug: false,
        }
    }
}

impl Options {
    /// Whether `tag` is one of the scored tags.
    #[must_use]
    pub fn is_tag_to_score(&self, tag: &str) -> bool {
        self.tags_to_score.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_thresholds() {
        let opts = Options::default();

        assert_eq!(opts.max_elems_to_parse, 0);
        assert_eq!(opts.n_top_candidates, 5);
        assert_eq!(opts.char_threshold, 500);
        assert_eq!(opts.classes_to_preserve, vec!["page".to_string()]);
        assert!(!opts.keep_classes);
        assert!(opts.allowed_video_regex.is_none());
        assert!(!opts.disable_json_ld);
        assert!(opts.url.is_none());
        assert!(!opts.debug);
    }

    #[test]
    fn test_default_tags_to_score() {
        let opts = Options::default();
        for tag in ["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"] {
            assert!(opts.is_tag_to_score(tag), "{tag}");
        }
        assert!(!opts.is_tag_to_score("div"));
        assert!(!opts.is_tag_to_score("h1"));
    }

    #[test]
    fn test_custom_tags_to_score() {
        let opts = Options {
            tags_to_score: vec!["div".to_string()],
            ..Options::default()
        };
        assert!(opts.is_tag_to_score("div"));
        assert!(!opts.is_tag_to_score("p"));
    }
}
