//! Error types for the lexer.

use thiserror::Error;

/// Fatal lexing failures. Any of these aborts the whole tokenize call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `{{` whose brace contexts never close before the end of the source.
    #[error("unclosed tag starting at byte {offset}")]
    UnclosedTag { offset: usize },

    /// A `{{raw}}` with no matching `{{/raw}}`.
    #[error("unclosed raw block starting at byte {offset}")]
    UnclosedRaw { offset: usize },

    /// A `{{#` with no `#}}`. Only raised with strict comment termination.
    #[error("unclosed comment starting at byte {offset}")]
    UnclosedComment { offset: usize },
}

impl LexError {
    /// Byte offset in the source where the unclosed construct begins.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnclosedTag { offset }
            | LexError::UnclosedRaw { offset }
            | LexError::UnclosedComment { offset } => *offset,
        }
    }

    /// Maps the error offset to a 1-based `(line, column)` in `source`.
    /// Columns count characters, not bytes.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.offset().min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Result type for lexer operations.
pub type Result<T> = std::result::Result<T, LexError>;
