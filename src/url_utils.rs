//! URL Utility Functions
//!
//! Validation and resolution helpers for links, images and favicons found in
//! the page. Resolution needs a base URL; without one, values pass through
//! unchanged.

use url::Url;

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Whether `s` is usable as a request target: an absolute URL, or an
/// absolute path.
#[must_use]
pub fn is_valid_url(s: &str) -> bool {
    if s.starts_with('/') {
        return !s.chars().any(|c| c.is_ascii_control());
    }
    Url::parse(s).is_ok()
}

/// Parse the document URL given in the options.
///
/// # Returns
/// * `Some(Url)` for an absolute URL with a host, `None` otherwise
#[must_use]
pub fn parse_base_url(url_str: &str) -> Option<Url> {
    match is_absolute_url(url_str) {
        (true, parsed) => parsed,
        (false, _) => None,
    }
}

/// Convert a relative URI to absolute form against `base`.
///
/// Fragments (`#top`), `data:` URIs and URIs that are already absolute come
/// back as they are. So does everything when there is no base, or when the
/// URI cannot be resolved.
///
/// # Examples
/// ```
/// use rs_readability::url_utils::to_absolute_uri;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/articles/").ok();
/// assert_eq!(
///     to_absolute_uri("page.html", base.as_ref()),
///     "https://example.com/articles/page.html"
/// );
/// assert_eq!(to_absolute_uri("#notes", base.as_ref()), "#notes");
/// ```
#[must_use]
pub fn to_absolute_uri(uri: &str, base: Option<&Url>) -> String {
    let Some(base) = base else {
        return uri.to_string();
    };

    if uri.is_empty() || uri.starts_with('#') || uri.starts_with("data:") {
        return uri.to_string();
    }

    if is_absolute_url(uri).0 {
        return uri.to_string();
    }

    match base.join(uri) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        match Url::parse(s) {
            Ok(url) => url,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_is_absolute_url_valid() {
        let (is_abs, url) = is_absolute_url("https://example.com/path");
        assert!(is_abs);
        assert!(url.is_some());

        let (is_abs, _) = is_absolute_url("  http://example.com  ");
        assert!(is_abs);
    }

    #[test]
    fn test_is_absolute_url_invalid() {
        assert!(!is_absolute_url("/relative/path").0);
        assert!(!is_absolute_url("example.com").0);
        assert!(!is_absolute_url("").0);
        assert!(!is_absolute_url("data:image/png;base64,abc").0);
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/a.jpg"));
        assert!(is_valid_url("/images/a.jpg"));
        assert!(is_valid_url("/a.jpg 1x, /b.jpg 2x"));
        assert!(!is_valid_url("a.jpg"));
        assert!(!is_valid_url("not a url .jpg"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://example.com/post/1").is_some());
        assert!(parse_base_url("/post/1").is_none());
    }

    #[test]
    fn test_to_absolute_uri_relative() {
        let base = base("https://example.com/articles/");

        assert_eq!(
            to_absolute_uri("page.html", Some(&base)),
            "https://example.com/articles/page.html"
        );
        assert_eq!(
            to_absolute_uri("/root/page.html", Some(&base)),
            "https://example.com/root/page.html"
        );
        assert_eq!(
            to_absolute_uri("../other/page.html", Some(&base)),
            "https://example.com/other/page.html"
        );
    }

    #[test]
    fn test_to_absolute_uri_passthrough() {
        let base = base("https://example.com/");

        assert_eq!(
            to_absolute_uri("https://other.com/page", Some(&base)),
            "https://other.com/page"
        );
        assert_eq!(to_absolute_uri("#section", Some(&base)), "#section");
        assert_eq!(
            to_absolute_uri("data:image/png;base64,abc", Some(&base)),
            "data:image/png;base64,abc"
        );
        assert_eq!(to_absolute_uri("", Some(&base)), "");
        assert_eq!(to_absolute_uri("page.html", None), "page.html");
    }
}
