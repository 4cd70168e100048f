//! HTML Meta Tag Extraction
//!
//! Collects `<meta>` values keyed by a normalized property or name, covering
//! Open Graph, Twitter cards, Dublin Core, Weibo and Parse.ly tags.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::dom::Tree;
use crate::patterns::{NAME_PATTERN, PROPERTY_PATTERN};

/// Meta values by normalized key, e.g. `og:title` or `parsely-author`.
#[derive(Debug, Clone, Default)]
pub struct MetaValues(HashMap<String, String>);

impl MetaValues {
    /// The first non-empty value among `keys`.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lower-case and drop all whitespace.
fn squash_key(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect()
}

/// Collect meta tag values.
///
/// A `property` may hold several prefixed names; every one of them gets the
/// content. `name` is only consulted when `property` yielded nothing, and its
/// dots become colons so `dc.title` and `dc:title` share a key.
#[must_use]
pub fn collect_meta_values(tree: &Tree) -> MetaValues {
    let mut values = HashMap::new();

    for meta in tree.elements_by_tag_name(tree.root(), "meta") {
        let content = tree.attr(meta, "content").unwrap_or_default();
        if content.is_empty() {
            continue;
        }
        let content = content.trim();

        let mut matched = false;
        if let Some(property) = tree.attr(meta, "property").filter(|p| !p.is_empty()) {
            for m in PROPERTY_PATTERN.find_iter(&property) {
                values.insert(squash_key(m.as_str()), content.to_string());
                matched = true;
            }
        }

        if !matched {
            if let Some(name) = tree.attr(meta, "name").filter(|n| NAME_PATTERN.is_match(n)) {
                values.insert(squash_key(&name).replace('.', ":"), content.to_string());
            }
        }
    }

    MetaValues(values)
}

/// Parse a date string from meta tags or JSON-LD.
///
/// Supports RFC 3339, RFC 2822, ISO 8601 without offset, and a few common
/// date-only layouts. Values without an offset are taken as UTC.
#[must_use]
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%B %d, %Y", // January 15, 2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    log::trace!("unparsable date {date_str:?}");
    None
}
