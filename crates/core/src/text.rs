//! Text cleanup shared by the HTML conversion pipeline.
//!
//! Handles HTML entity decoding, whitespace collapsing, and Unicode NFC
//! normalization so extracted text renders consistently in the output deck.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace (including newlines) into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching named, decimal, and hex character references.
static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX]?[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").unwrap());

/// Decode the HTML character references that appear in slide markup.
///
/// Named entities are limited to the common set; unknown references are
/// left untouched rather than dropped.
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            decode_reference(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_reference(body: &str) -> Option<String> {
    if let Some(num) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        let code = u32::from_str_radix(num, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }
    if let Some(num) = body.strip_prefix('#') {
        let code: u32 = num.parse().ok()?;
        return char::from_u32(code).map(String::from);
    }

    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "hellip" => "\u{2026}",
        "copy" => "\u{00A9}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "bull" => "\u{2022}",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Normalize one extracted text run: decode entities, collapse whitespace,
/// trim, and apply Unicode NFC.
pub fn normalize_text(text: &str) -> String {
    let decoded = decode_entities(text);
    let collapsed = WHITESPACE_COLLAPSE_REGEX.replace_all(&decoded, " ");
    collapsed.trim().nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("it&apos;s"), "it's");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#65;"), "A");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("&#8212;"), "\u{2014}");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  hello\n\t world  "), "hello world");
    }

    #[test]
    fn test_normalize_decodes_and_trims() {
        assert_eq!(normalize_text(" a &amp;\n b "), "a & b");
    }

    #[test]
    fn test_normalize_applies_nfc() {
        // e + combining acute composes to a single code point
        assert_eq!(normalize_text("e\u{0301}"), "\u{00E9}");
    }
}
