//! Character encoding detection and transcoding.
//!
//! Byte input is decoded before parsing: a byte order mark wins, then a
//! charset declared in the document head, then UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::error::{Error, Result};

/// Only this much of the document is searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Charset label declared in the document head, if any.
fn declared_charset(head: &str) -> Option<&str> {
    // The http-equiv form also matches the shorter pattern, so check it first.
    CONTENT_TYPE_CHARSET_RE
        .captures(head)
        .or_else(|| CHARSET_META_RE.captures(head))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Detect the character encoding of HTML bytes.
///
/// # Errors
/// `Error::EncodingError` when the document declares a charset label that is
/// not a known encoding.
pub fn detect_encoding(html: &[u8]) -> Result<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return Ok(encoding);
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    match declared_charset(&head) {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| Error::EncodingError(format!("unknown charset {label:?}"))),
        None => Ok(UTF_8),
    }
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use rs_readability::encoding::decode_html;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// let text = decode_html(html)?;
/// assert!(text.contains("Café"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
///
/// # Errors
/// See [`detect_encoding`].
pub fn decode_html(html: &[u8]) -> Result<Cow<'_, str>> {
    let encoding = detect_encoding(html)?;
    // decode() sniffs and strips the BOM itself.
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::debug!("malformed {} input replaced with U+FFFD", used.name());
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(html: &[u8]) -> &'static Encoding {
        match detect_encoding(html) {
            Ok(encoding) => encoding,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    fn decode(html: &[u8]) -> String {
        match decode_html(html) {
            Ok(text) => text.into_owned(),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn detect_utf8_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect(html), UTF_8);
    }

    #[test]
    fn detect_iso88591_from_meta_charset() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect(html).name(), "windows-1252");
    }

    #[test]
    fn detect_charset_from_content_type() {
        let html = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=Shift_JIS"></head></html>"#;
        assert_eq!(detect(html).name(), "Shift_JIS");
    }

    #[test]
    fn bom_wins_over_declaration() {
        let mut html = vec![0xFF, 0xFE];
        for unit in "<meta charset=\"windows-1252\">".encode_utf16() {
            html.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect(&html).name(), "UTF-16LE");
    }

    #[test]
    fn default_to_utf8_when_no_charset() {
        assert_eq!(detect(b"<html><body>Test</body></html>"), UTF_8);
    }

    #[test]
    fn declaration_past_sniff_window_is_ignored() {
        let mut html = vec![b' '; SNIFF_LEN];
        html.extend_from_slice(br#"<meta charset="windows-1252">"#);
        assert_eq!(detect(&html), UTF_8);
    }

    #[test]
    fn unknown_charset_is_an_error() {
        let html = br#"<meta charset="x-made-up">"#;
        match detect_encoding(html) {
            Err(Error::EncodingError(msg)) => assert!(msg.contains("x-made-up")),
            other => panic!("expected EncodingError, got {other:?}"),
        }
    }

    #[test]
    fn transcode_windows1252_to_utf8() {
        // 0x93/0x94 are curly double quotes in windows-1252
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        assert!(decode(html).contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = decode(b"<html><body>Test \xFF\xFE Invalid</body></html>");
        assert!(text.contains("Test"));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.contains("Invalid"));
    }

    #[test]
    fn declared_charset_forms() {
        assert_eq!(declared_charset("<META CHARSET=\"UTF-8\">"), Some("UTF-8"));
        assert_eq!(declared_charset("<meta charset=utf-8>"), Some("utf-8"));
        assert_eq!(
            declared_charset(r#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=koi8-r">"#),
            Some("koi8-r")
        );
        assert_eq!(declared_charset("<meta name=\"viewport\">"), None);
    }
}
