//! Compiled regex patterns and class/id classifiers.
//!
//! All patterns are compiled once on first use via `LazyLock` and are
//! read-only afterwards. The classifier functions at the bottom are pure and
//! take the `class + " " + id` string of an element (see
//! [`Tree::match_string`](crate::dom::Tree::match_string)).

#![allow(clippy::expect_used)]

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class/ID Classifiers
// =============================================================================

/// Class/id words that mark an author or credit line.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Class/id words that suggest article content.
pub static POSITIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE_CLASS regex")
});

/// Class/id words that suggest boilerplate. Unanchored: "hid" also matches
/// inside "hidden".
pub static NEGATIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hid|banner|combx|comment|com-|contact|foot(note|er)?|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget",
    )
    .expect("NEGATIVE_CLASS regex")
});

/// Broad boilerplate list used to drop nodes before scoring.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Overrides `UNLIKELY_CANDIDATES` for the pre-scoring removal only.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("MAYBE_CANDIDATE regex")
});

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("MULTI_SPACE regex"));

// =============================================================================
// Content Patterns
// =============================================================================

/// Hosts whose iframes/objects/embeds are kept as video content.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

pub static TOKENIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("TOKENIZE_RE regex"));

pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));

pub static VISIBILITY_HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)visibility\s*:\s*hidden").expect("VISIBILITY_HIDDEN regex")
});

/// A period followed by a space or the end of the text.
pub static SENTENCE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_PERIOD regex"));

pub static SHARE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b|_)(share|sharedaddy)(\b|_)").expect("SHARE_ELEMENTS regex")
});

// =============================================================================
// Image Patterns
// =============================================================================

pub static LAZY_IMAGE_SRCSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("LAZY_IMAGE_SRCSET regex")
});

pub static LAZY_IMAGE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("LAZY_IMAGE_SRC regex")
});

pub static IMG_EXTENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").expect("IMG_EXTENSIONS regex"));

/// One `url [descriptor]` item of a `srcset` list.
pub static SRCSET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex")
});

pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

pub static FAVICON_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)x(\d+)").expect("FAVICON_SIZE regex"));

// =============================================================================
// Metadata Patterns
// =============================================================================

pub static PROPERTY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(dc|dcterm|og|article|twitter)\s*:\s*(author|creator|description|title|site_name|published_time|modified_time|image\S*)\s*",
    )
    .expect("PROPERTY_PATTERN regex")
});

pub static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|article|og|twitter|parsely|weibo:(article|webpage))\s*[-\.:]\s*)?(author|creator|pub-date|description|title|site_name|published_time|modified_time|image)\s*$",
    )
    .expect("NAME_PATTERN regex")
});

pub static JSON_LD_ARTICLE_TYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|APIReference$",
    )
    .expect("JSON_LD_ARTICLE_TYPES regex")
});

pub static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!\[CDATA\[|\]\]>\s*$").expect("CDATA regex"));

pub static SCHEMA_ORG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://schema\.org/?$").expect("SCHEMA_ORG regex"));

// =============================================================================
// Title Patterns
// =============================================================================

pub static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) [\|\-\\/>»] ").expect("TITLE_SEPARATOR regex"));

pub static TITLE_HIERARCHY_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) [\\/>»] ").expect("TITLE_HIERARCHY_SEP regex"));

pub static TITLE_REMOVE_FINAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.*)[\|\-\\/>»] .*").expect("TITLE_REMOVE_FINAL_PART regex")
});

pub static TITLE_REMOVE_1ST_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[^\|\-\\/>»]*[\|\-\\/>»](.*)").expect("TITLE_REMOVE_1ST_PART regex")
});

pub static TITLE_ANY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\|\-\\/>»]+").expect("TITLE_ANY_SEPARATOR regex"));

// =============================================================================
// Classifier Functions
// =============================================================================

/// Class/id looks like an author or credit line.
#[inline]
#[must_use]
pub fn is_byline(match_string: &str) -> bool {
    BYLINE.is_match(match_string)
}

#[inline]
#[must_use]
pub fn is_positive_class(match_string: &str) -> bool {
    POSITIVE_CLASS.is_match(match_string)
}

#[inline]
#[must_use]
pub fn is_negative_class(match_string: &str) -> bool {
    NEGATIVE_CLASS.is_match(match_string)
}

#[inline]
#[must_use]
pub fn is_unlikely_candidate(match_string: &str) -> bool {
    UNLIKELY_CANDIDATES.is_match(match_string)
}

#[inline]
#[must_use]
pub fn maybe_its_a_candidate(match_string: &str) -> bool {
    MAYBE_CANDIDATE.is_match(match_string)
}

/// Collapses whitespace runs of two or more chars to a single space. Leading
/// and trailing whitespace is collapsed but not removed.
#[must_use]
pub fn normalize_spaces(s: &str) -> Cow<'_, str> {
    MULTI_SPACE.replace_all(s, " ")
}
