//! Favicon selection.

use url::Url;

use crate::dom::Tree;
use crate::patterns::FAVICON_SIZE;
use crate::url_utils::to_absolute_uri;

/// The largest square PNG icon linked from the page.
///
/// Size comes from `sizes`, else from a `NxN` in the href, else counts as 0.
/// Between equal sizes the first link wins. The href is resolved against
/// `base`.
#[must_use]
pub fn favicon(tree: &Tree, base: Option<&Url>) -> Option<String> {
    let mut best: Option<(String, i64)> = None;

    for link in tree.elements_by_tag_name(tree.root(), "link") {
        let attr = |name: &str| {
            tree.attr(link, name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let rel = attr("rel");
        let href = attr("href");

        if href.is_empty() || !rel.contains("icon") {
            continue;
        }
        if attr("type") != "image/png" && !href.contains(".png") {
            continue;
        }

        let size = square_size(&attr("sizes"))
            .or_else(|| square_size(&href))
            .unwrap_or(0);

        if best.as_ref().is_none_or(|(_, s)| size > *s) {
            best = Some((href, size));
        }
    }

    best.map(|(href, _)| to_absolute_uri(&href, base))
}

/// Side length of the first `NxN` in `s`, if both sides agree.
fn square_size(s: &str) -> Option<i64> {
    let caps = FAVICON_SIZE.captures(s)?;
    let (w, h) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());
    if w != h {
        return None;
    }
    w.parse().ok()
}
