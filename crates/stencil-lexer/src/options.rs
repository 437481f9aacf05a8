//! Lexer configuration.
//!
//! Every knob defaults to the permissive behavior. Hosts that load their
//! settings from a file can embed [`LexerOptions`] directly; every field is
//! optional when deserializing.
//!
//! ```yaml
//! comments: strict
//! filters: outermost
//! escapes: backslash
//! ```

use serde::Deserialize;

/// What happens when a `{{#` comment has no closing `#}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentTermination {
    /// The rest of the source becomes the comment and lexing stops.
    #[default]
    Lenient,
    /// Fail with [`LexError::UnclosedComment`](crate::LexError::UnclosedComment).
    Strict,
}

/// Which `|>` occurrences split a tag into filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDepth {
    /// Any `|>` inside a bracket context, however deeply nested, as long as
    /// it is outside quotes, template literals and block comments.
    #[default]
    Nested,
    /// Only a `|>` directly inside the tag's own `{{ }}`. Pipes inside
    /// nested `{ }` groups or `${ }` interpolations stay in the expression
    /// text. Parentheses and square brackets are not tracked, so a pipe
    /// inside `( )` still splits.
    Outermost,
}

/// How backslashes inside tag string literals are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escapes {
    /// A backslash is an ordinary character; every quote or backtick of
    /// the open kind closes the literal.
    #[default]
    None,
    /// Inside `'...'`, `"..."` and template literals a backslash escapes the
    /// next byte, so `"a\"}}"` is one string and `` `\${` `` does not
    /// start an interpolation.
    Backslash,
}

/// Options for a [`Lexer`](crate::Lexer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    pub comments: CommentTermination,
    pub filters: FilterDepth,
    pub escapes: Escapes,
}

impl LexerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes an unterminated comment a fatal error.
    pub fn strict_comments(mut self) -> Self {
        self.comments = CommentTermination::Strict;
        self
    }

    /// Only split filters at the tag's outermost brace level.
    pub fn outermost_filters(mut self) -> Self {
        self.filters = FilterDepth::Outermost;
        self
    }

    /// Honor backslash escapes inside tag string literals.
    pub fn backslash_escapes(mut self) -> Self {
        self.escapes = Escapes::Backslash;
        self
    }
}
