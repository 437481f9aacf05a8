//! Tag scanner.
//!
//! Finds where a `{{ ... }}` tag really ends and where its `|>` filter
//! boundaries are. A plain search for `}}` is not enough because braces,
//! quotes and pipes may appear inside string literals, template literals,
//! block comments and nested brace groups of the tag expression:
//!
//! ```text
//! {{ "}}" |> upper }}
//! {{ `a ${ {b: 1}.b } c` }}
//! {{ x /* }} */ }}
//! ```
//!
//! The scanner walks the tag byte by byte and keeps a stack of lexical
//! contexts. Every delimiter it cares about is ASCII, so byte offsets it
//! returns always fall on character boundaries.

use tracing::trace;

use crate::options::{Escapes, FilterDepth, LexerOptions};

/// Length of the tag's `{{` opener and `}}` closer.
const DELIMITER_LEN: usize = 2;

/// A lexical context inside a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// A `{` group. The bottom of the stack is the tag's own `{{`, which
    /// only a `}}` pair closes.
    Bracket,
    /// `'...'`
    SingleQuote,
    /// `"..."`
    DoubleQuote,
    /// A backtick template literal.
    Literal,
    /// `/* ... */`. A `/*` inside a comment opens another one.
    BlockComment,
}

impl Context {
    fn is_string(self) -> bool {
        matches!(
            self,
            Context::SingleQuote | Context::DoubleQuote | Context::Literal
        )
    }
}

#[derive(Debug)]
struct ContextStack {
    contexts: Vec<Context>,
}

impl ContextStack {
    fn for_tag() -> Self {
        Self {
            contexts: vec![Context::Bracket],
        }
    }

    fn top(&self) -> Option<Context> {
        self.contexts.last().copied()
    }

    fn depth(&self) -> usize {
        self.contexts.len()
    }

    fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// True when the scanner is looking at expression code rather than the
    /// inside of a string or comment.
    fn in_code(&self) -> bool {
        self.top() == Some(Context::Bracket)
    }

    fn push(&mut self, context: Context, pos: usize) {
        self.contexts.push(context);
        trace!(pos, ?context, depth = self.depth(), "push context");
    }

    fn pop(&mut self, pos: usize) {
        let context = self.contexts.pop();
        trace!(pos, ?context, depth = self.depth(), "pop context");
    }
}

/// Scans the tag at the start of `source`, which must begin with `{{`.
///
/// Returns the cut points that split the tag: the first is always `2` (just
/// past `{{`), then one entry just past each filter's `|>`, and finally the
/// offset just past the closing `}}`. Every cut point after the first is
/// preceded by a two-byte marker (`|>` or `}}`).
///
/// For `{{ tag |> filter1 |> filter2 }}` this yields `[2, 9, 20, 31]`.
///
/// Returns `None` when the source ends before the tag is closed.
pub fn scan_tag(source: &str, options: &LexerOptions) -> Option<Vec<usize>> {
    debug_assert!(source.starts_with("{{"), "tag must start with {{");

    let bytes = source.as_bytes();
    let mut stack = ContextStack::for_tag();
    let mut cuts = vec![DELIMITER_LEN];
    let backslash = options.escapes == Escapes::Backslash;
    let mut escaped = false;
    // Offset of the last byte consumed by a backslash escape.
    let mut escaped_at = None;

    for pos in DELIMITER_LEN..bytes.len() {
        let byte = bytes[pos];
        let prev = bytes[pos - 1];
        let next = bytes.get(pos + 1).copied();
        let top = stack.top();

        if escaped {
            escaped = false;
            escaped_at = Some(pos);
            continue;
        }

        match byte {
            b'\\' if backslash && top.is_some_and(Context::is_string) => escaped = true,

            b'{' => {
                let interpolation = top == Some(Context::Literal)
                    && prev == b'$'
                    && escaped_at != Some(pos - 1);
                if interpolation || stack.in_code() {
                    stack.push(Context::Bracket, pos);
                }
            }

            b'}' if stack.in_code() => {
                if stack.depth() > 1 {
                    stack.pop(pos);
                } else if next == Some(b'}') {
                    stack.pop(pos);
                    debug_assert!(stack.is_empty());
                    cuts.push(pos + DELIMITER_LEN);
                    return Some(cuts);
                }
                // A lone `}` at the tag's own level is part of the expression.
            }

            b'"' => toggle(&mut stack, Context::DoubleQuote, pos),
            b'\'' => toggle(&mut stack, Context::SingleQuote, pos),
            b'`' => toggle(&mut stack, Context::Literal, pos),

            b'/' if !top.is_some_and(Context::is_string) => {
                if next == Some(b'*') {
                    stack.push(Context::BlockComment, pos);
                } else if top == Some(Context::BlockComment) && prev == b'*' {
                    stack.pop(pos);
                }
            }

            b'|' if next == Some(b'>') && stack.in_code() => {
                let outermost = stack.depth() == 1;
                if options.filters == FilterDepth::Nested || outermost {
                    trace!(pos, depth = stack.depth(), "filter boundary");
                    cuts.push(pos + 2);
                }
            }

            _ => {}
        }
    }

    None
}

/// Closes `context` if it is on top, or opens it from plain code.
fn toggle(stack: &mut ContextStack, context: Context, pos: usize) {
    if stack.top() == Some(context) {
        stack.pop(pos);
    } else if stack.in_code() {
        stack.push(context, pos);
    }
}
