//! The token stream driver.
//!
//! Walks a template source from start to end, switching between text,
//! comment and tag modes, and produces the flat token list consumed by the
//! template compiler. Tag bodies are delegated to [`scan_tag`] and raw
//! blocks to [`detect_raw`].

use tracing::{debug, trace};

use crate::error::{LexError, Result};
use crate::options::{CommentTermination, LexerOptions};
use crate::raw::{detect_raw, RawMatch};
use crate::scanner::scan_tag;
use crate::token::{Span, Token, TokenKind};

const OPEN: &str = "{{";
const COMMENT_OPEN: &str = "{{#";
const COMMENT_CLOSE: &str = "#}}";
/// Length of the `|>` or `}}` marker that precedes every cut point.
const MARKER_LEN: usize = 2;
const TRIM: char = '-';

/// Splits template sources into tokens.
///
/// A `Lexer` holds only its options and can be shared freely; each
/// [`tokenize`](Lexer::tokenize) call keeps its own state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer {
    options: LexerOptions,
}

impl Lexer {
    /// Creates a lexer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Tokenizes a whole template source.
    ///
    /// # Errors
    ///
    /// Fails on a tag or raw block that is never closed, and on an
    /// unterminated comment when comments are strict. No tokens are
    /// returned on failure.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(len = source.len()),
        err(level = "debug")
    )]
    pub fn tokenize<'a>(&self, source: &'a str) -> Result<Vec<Token<'a>>> {
        let mut run = Run::new(source, self.options);
        let mut mode = Mode::Text;

        while run.pos < source.len() {
            let next = match mode {
                Mode::Text => run.lex_text()?,
                Mode::Comment => run.lex_comment()?,
                Mode::Tag => Some(run.lex_tag()?),
            };
            match next {
                Some(next) => mode = next,
                None => break,
            }
        }

        debug!(tokens = run.tokens.len(), "tokenized");
        Ok(run.tokens)
    }
}

/// Tokenizes `source` with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    Lexer::new().tokenize(source)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Tag,
    Comment,
}

/// State of one tokenize call.
struct Run<'a> {
    source: &'a str,
    options: LexerOptions,
    pos: usize,
    /// Set by a `-}}` trim directive, consumed by the next text token.
    trim_next: bool,
    tokens: Vec<Token<'a>>,
}

impl<'a> Run<'a> {
    fn new(source: &'a str, options: LexerOptions) -> Self {
        Self {
            source,
            options,
            pos: 0,
            trim_next: false,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Emits the text up to the next `{{` and decides what that `{{` opens.
    /// Returns `None` once the source has no more `{{`.
    fn lex_text(&mut self) -> Result<Option<Mode>> {
        let found = self.rest().find(OPEN).map(|i| self.pos + i);
        let end = found.unwrap_or(self.source.len());

        let mut span = Span::new(self.pos, end);
        if std::mem::take(&mut self.trim_next) {
            span = span.trim_start(self.source);
        }
        self.emit(TokenKind::Text, span);

        let Some(open) = found else {
            self.pos = end;
            return Ok(None);
        };
        self.pos = open;

        match detect_raw(self.rest()) {
            RawMatch::Block(block) => {
                let body = Span::new(open + block.content_start, open + block.content_end);
                self.emit(TokenKind::Raw, body);
                self.pos = open + block.end;
                Ok(Some(Mode::Text))
            }
            RawMatch::Unclosed => Err(LexError::UnclosedRaw { offset: open }),
            RawMatch::NotRaw if self.rest().starts_with(COMMENT_OPEN) => Ok(Some(Mode::Comment)),
            RawMatch::NotRaw => Ok(Some(Mode::Tag)),
        }
    }

    /// Emits a `{{# ... #}}` comment body verbatim.
    fn lex_comment(&mut self) -> Result<Option<Mode>> {
        let start = self.pos;
        let body = start + COMMENT_OPEN.len();

        match self.source[body..].find(COMMENT_CLOSE) {
            Some(i) => {
                self.emit(TokenKind::Comment, Span::new(body, body + i));
                self.pos = body + i + COMMENT_CLOSE.len();
                Ok(Some(Mode::Text))
            }
            None => match self.options.comments {
                CommentTermination::Lenient => {
                    trace!(offset = start, "unterminated comment runs to end of source");
                    self.emit(TokenKind::Comment, Span::new(body, self.source.len()));
                    self.pos = self.source.len();
                    Ok(None)
                }
                CommentTermination::Strict => Err(LexError::UnclosedComment { offset: start }),
            },
        }
    }

    /// Emits one tag token followed by a filter token per `|>` segment,
    /// applying `{{-` and `-}}` trim directives.
    fn lex_tag(&mut self) -> Result<Mode> {
        let start = self.pos;
        let cuts = scan_tag(self.rest(), &self.options)
            .ok_or(LexError::UnclosedTag { offset: start })?;
        let segments = cuts.len() - 1;

        for (index, pair) in cuts.windows(2).enumerate() {
            let mut span = Span::new(start + pair[0], start + pair[1] - MARKER_LEN);
            let is_tag = index == 0;
            let is_last = index + 1 == segments;

            if is_tag && self.slice(span).starts_with(TRIM) {
                span.start += TRIM.len_utf8();
                self.trim_previous_text();
            }
            if is_last && self.slice(span).ends_with(TRIM) {
                span.end -= TRIM.len_utf8();
                self.trim_next = true;
            }

            let kind = if is_tag {
                TokenKind::Tag
            } else {
                TokenKind::Filter
            };
            self.emit(kind, span.trim(self.source));
        }

        self.pos = start + cuts[segments];
        Ok(Mode::Text)
    }

    fn slice(&self, span: Span) -> &'a str {
        &self.source[span.start..span.end]
    }

    /// Strips trailing whitespace from the text token just before a `{{-`
    /// tag, dropping it entirely if nothing is left.
    fn trim_previous_text(&mut self) {
        let source = self.source;
        let Some(last) = self.tokens.last_mut() else {
            return;
        };
        if last.kind != TokenKind::Text {
            return;
        }

        *last = Token::new(TokenKind::Text, source, last.span.trim_end(source));
        if last.span.is_empty() {
            self.tokens.pop();
        }
    }

    /// Pushes a token. Empty text is never emitted.
    fn emit(&mut self, kind: TokenKind, span: Span) {
        if kind == TokenKind::Text && span.is_empty() {
            return;
        }
        trace!(%kind, start = span.start, end = span.end, "token");
        self.tokens.push(Token::new(kind, self.source, span));
    }
}
