//! Text extraction from slide HTML.
//!
//! Best-effort extraction for the hand-written slide markup this tool
//! consumes: block-level elements are matched with regexes rather than a
//! full HTML parse, which is enough for well-formed fragments.

use deck_core::text::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

/// Regex to drop `<script>` and `<style>` regions wholesale.
static SCRIPT_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)>").unwrap()
});

/// Regex to drop HTML comments.
static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Regex matching the block-level elements we lift text from.
static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(h[1-6]|p|li)\b[^>]*>(.*?)</(?:h[1-6]|p|li)>").unwrap()
});

/// Regex stripping any remaining inline tags.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Classification of an extracted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// From `h1`-`h3`.
    Heading,
    /// From `h4`-`h6`, `p`, or `li`.
    Body,
}

/// One extracted text block, in document order.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

/// Extract normalized text fragments from slide HTML, in document order.
///
/// Empty blocks are dropped; list items are rendered with a bullet prefix.
pub fn extract_fragments(html: &str) -> Vec<Fragment> {
    let cleaned = COMMENT_REGEX.replace_all(html, "");
    let cleaned = SCRIPT_STYLE_REGEX.replace_all(&cleaned, "");

    let mut fragments = Vec::new();

    for caps in BLOCK_REGEX.captures_iter(&cleaned) {
        let tag = caps[1].to_lowercase();
        let inner = TAG_REGEX.replace_all(&caps[2], " ");
        let text = normalize_text(&inner);

        if text.is_empty() {
            continue;
        }

        let kind = classify_tag(&tag);
        let text = if tag == "li" {
            format!("\u{2022} {}", text)
        } else {
            text
        };

        fragments.push(Fragment { kind, text });
    }

    fragments
}

fn classify_tag(tag: &str) -> FragmentKind {
    match tag {
        "h1" | "h2" | "h3" => FragmentKind::Heading,
        _ => FragmentKind::Body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_heading_and_body() {
        let html = "<html><body><h1>Title</h1><p>First point</p></body></html>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].kind, FragmentKind::Heading);
        assert_eq!(fragments[0].text, "Title");
        assert_eq!(fragments[1].kind, FragmentKind::Body);
        assert_eq!(fragments[1].text, "First point");
    }

    #[test]
    fn test_extract_strips_inline_tags() {
        let html = "<p>Hello <b>bold</b> and <a href=\"#\">link</a></p>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Hello bold and link");
    }

    #[test]
    fn test_extract_skips_script_and_style() {
        let html = "<style>p { color: red; }</style><script>let x = '<p>no</p>';</script><p>Yes</p>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Yes");
    }

    #[test]
    fn test_extract_skips_comments_and_empty_blocks() {
        let html = "<!-- <p>commented</p> --><p>   </p><p>Real</p>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Real");
    }

    #[test]
    fn test_extract_list_items_get_bullets() {
        let html = "<ul><li>One</li><li>Two</li></ul>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "\u{2022} One");
        assert_eq!(fragments[0].kind, FragmentKind::Body);
    }

    #[test]
    fn test_extract_decodes_entities() {
        let html = "<p>Fish &amp; Chips</p>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments[0].text, "Fish & Chips");
    }

    #[test]
    fn test_extract_no_blocks() {
        assert!(extract_fragments("<div>loose text</div>").is_empty());
        assert!(extract_fragments("").is_empty());
    }

    #[test]
    fn test_heading_levels_classified() {
        let html = "<h3>Near</h3><h4>Far</h4>";
        let fragments = extract_fragments(html);

        assert_eq!(fragments[0].kind, FragmentKind::Heading);
        assert_eq!(fragments[1].kind, FragmentKind::Body);
    }
}
