//! Token types produced by the lexer.

use serde::Serialize;
use std::fmt;

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Literal text outside any `{{ }}` construct.
    Text,
    /// The main expression of a `{{ ... }}` tag.
    Tag,
    /// One `|>` segment following a tag expression.
    Filter,
    /// The body of a `{{# ... #}}` comment.
    Comment,
    /// The verbatim body of a `{{raw}} ... {{/raw}}` block.
    Raw,
}

impl TokenKind {
    /// Returns the lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::Tag => "tag",
            TokenKind::Filter => "filter",
            TokenKind::Comment => "comment",
            TokenKind::Raw => "raw",
        }
    }

    /// Whether a renderer outputs this token's text as-is.
    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Text | TokenKind::Raw)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte range into the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shrinks the span past any leading whitespace in `source`.
    pub fn trim_start(self, source: &str) -> Span {
        let text = &source[self.start..self.end];
        let skipped = text.len() - text.trim_start().len();
        Span::new(self.start + skipped, self.end)
    }

    /// Shrinks the span before any trailing whitespace in `source`.
    pub fn trim_end(self, source: &str) -> Span {
        let text = &source[self.start..self.end];
        Span::new(self.start, self.start + text.trim_end().len())
    }

    /// Shrinks the span on both sides. An all-whitespace span collapses
    /// to an empty span at its start.
    pub fn trim(self, source: &str) -> Span {
        self.trim_end(source).trim_start(source)
    }
}

/// A single lexed token borrowing its text from the template source.
///
/// `text` always equals `&source[span.start..span.end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Creates a token covering `span` of `source`.
    pub fn new(kind: TokenKind, source: &'a str, span: Span) -> Self {
        Self {
            kind,
            text: &source[span.start..span.end],
            span,
        }
    }

    /// Returns the `(kind, text)` pair, the shape most consumers match on.
    pub fn as_pair(&self) -> (TokenKind, &'a str) {
        (self.kind, self.text)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}
