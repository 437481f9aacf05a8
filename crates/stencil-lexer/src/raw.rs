//! `{{raw}} ... {{/raw}}` detection.

use once_cell::sync::Lazy;
use regex::Regex;

static RAW_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{\s*raw\s*\}\}").expect("raw open pattern is valid"));

static RAW_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*/raw\s*\}\}").expect("raw close pattern is valid"));

/// Offsets of a raw block, relative to the `{{` that opens it.
///
/// `source[content_start..content_end]` is the verbatim body and lexing
/// resumes at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock {
    pub content_start: usize,
    pub content_end: usize,
    pub end: usize,
}

/// Outcome of probing a `{{` for a raw block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMatch {
    /// The `{{` does not open a raw block.
    NotRaw,
    /// A complete raw block.
    Block(RawBlock),
    /// `{{raw}}` without a closing `{{/raw}}` anywhere after it.
    Unclosed,
}

/// Checks whether `source` starts with a `{{raw}}` marker (whitespace
/// allowed inside the braces) and finds its first closing `{{/raw}}`.
///
/// Raw blocks do not nest: the body ends at the first closing marker.
pub fn detect_raw(source: &str) -> RawMatch {
    let Some(open) = RAW_OPEN.find(source) else {
        return RawMatch::NotRaw;
    };

    match RAW_CLOSE.find_at(source, open.end()) {
        Some(close) => RawMatch::Block(RawBlock {
            content_start: open.end(),
            content_end: close.start(),
            end: close.end(),
        }),
        None => RawMatch::Unclosed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(source: &str) -> &str {
        match detect_raw(source) {
            RawMatch::Block(block) => &source[block.content_start..block.content_end],
            other => panic!("expected raw block, got {:?}", other),
        }
    }

    #[test]
    fn basic_block() {
        let src = "{{raw}}{{ not a tag }}{{/raw}} after";
        assert_eq!(
            detect_raw(src),
            RawMatch::Block(RawBlock {
                content_start: 7,
                content_end: 22,
                end: 30,
            })
        );
        assert_eq!(body(src), "{{ not a tag }}");
    }

    #[test]
    fn whitespace_inside_markers() {
        let src = "{{ raw }} x {{ /raw }}";
        assert_eq!(body(src), " x ");
        let src = "{{\n  raw\t}}y{{/raw\n}}";
        assert_eq!(body(src), "y");
    }

    #[test]
    fn empty_body() {
        assert_eq!(body("{{raw}}{{/raw}}"), "");
    }

    #[test]
    fn first_close_wins() {
        let src = "{{raw}}a{{/raw}}b{{/raw}}";
        assert_eq!(body(src), "a");
    }

    #[test]
    fn other_tags_are_not_raw() {
        assert_eq!(detect_raw("{{ rawValue }}"), RawMatch::NotRaw);
        assert_eq!(detect_raw("{{ raw_value }}"), RawMatch::NotRaw);
        assert_eq!(detect_raw("{{ x }}{{raw}}{{/raw}}"), RawMatch::NotRaw);
        assert_eq!(detect_raw("{{- raw }}"), RawMatch::NotRaw);
        assert_eq!(detect_raw("{{# raw #}}"), RawMatch::NotRaw);
    }

    #[test]
    fn unclosed_block() {
        assert_eq!(detect_raw("{{raw}} forever"), RawMatch::Unclosed);
        assert_eq!(detect_raw("{{raw}}{{ /raw"), RawMatch::Unclosed);
    }

    #[test]
    fn close_marker_is_not_an_open_marker() {
        assert_eq!(detect_raw("{{/raw}}"), RawMatch::NotRaw);
    }
}
