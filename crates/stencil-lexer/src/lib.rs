//! Tokenizer for `{{ }}` templates.
//!
//! This crate is the lexical front end of the template language. It turns a
//! template source into a flat list of [`Token`]s that the compiler consumes:
//! literal text, tag expressions, the filters piped after them, comments,
//! and raw blocks. It does not parse or validate the expressions themselves;
//! it only finds where each one starts and ends.
//!
//! # Example
//!
//! ```rust
//! use stencil_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("Hello {{ user.name |> upper }}!").unwrap();
//! let pairs: Vec<_> = tokens.iter().map(|t| t.as_pair()).collect();
//!
//! assert_eq!(
//!     pairs,
//!     vec![
//!         (TokenKind::Text, "Hello "),
//!         (TokenKind::Tag, "user.name"),
//!         (TokenKind::Filter, "upper"),
//!         (TokenKind::Text, "!"),
//!     ]
//! );
//! ```
//!
//! # Syntax
//!
//! | Form | Tokens |
//! |------|--------|
//! | `text` | `text` |
//! | `{{ expr }}` | `tag` |
//! | `{{ expr \|> f1 \|> f2 }}` | `tag`, `filter`, `filter` |
//! | `{{- expr }}` | `tag`; trailing whitespace of the preceding text is removed |
//! | `{{ expr -}}` | `tag`; leading whitespace of the following text is removed |
//! | `{{# comment #}}` | `comment` |
//! | `{{raw}} ... {{/raw}}` | `raw`, with the body untouched |
//!
//! Tag and filter text is trimmed. Text, comment and raw bodies are kept
//! verbatim apart from trim directives. There is no escape for a literal
//! `{{` in text; wrap it in a raw block instead.
//!
//! A renderer writes [`TokenKind::is_literal`] tokens (text and raw) as-is,
//! drops comments, evaluates each tag and pipes its value through the
//! filters that follow it:
//!
//! ```rust
//! use stencil_lexer::tokenize;
//!
//! let tokens = tokenize("a{{# note #}}b{{raw}}{{ x }}{{/raw}}{{ y }}").unwrap();
//! let literal: String = tokens
//!     .iter()
//!     .filter(|t| t.kind.is_literal())
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(literal, "ab{{ x }}");
//! ```
//!
//! Braces, quotes and `|>` inside string literals, template literals and
//! `/* */` comments of a tag expression do not end the tag or split it:
//!
//! ```rust
//! use stencil_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize(r#"{{ "}}" |> trim }}"#).unwrap();
//! assert_eq!(tokens[0].as_pair(), (TokenKind::Tag, r#""}}""#));
//! assert_eq!(tokens[1].as_pair(), (TokenKind::Filter, "trim"));
//! ```
//!
//! # Errors
//!
//! A tag that never closes and a `{{raw}}` without `{{/raw}}` fail the whole
//! call with a [`LexError`]. An unterminated `{{#` comment runs to the end of
//! the source unless [`LexerOptions::strict_comments`] is set.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: one debug span per tokenize call and
//! trace events for every token and scanner context change. Install a
//! subscriber in the host application to see them.

mod error;
mod lexer;
mod options;
mod raw;
mod scanner;
mod token;

pub use error::{LexError, Result};
pub use lexer::{tokenize, Lexer};
pub use options::{CommentTermination, Escapes, FilterDepth, LexerOptions};
pub use raw::{detect_raw, RawBlock, RawMatch};
pub use scanner::scan_tag;
pub use token::{Span, Token, TokenKind};
