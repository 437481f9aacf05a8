//! Property-based tests for the lexer using proptest.

use proptest::prelude::*;
use stencil_lexer::{tokenize, Lexer, LexerOptions, TokenKind};

// ============================================================================
// Template generators
// ============================================================================

/// One piece of a generated template, with the tokens it must produce.
#[derive(Debug, Clone)]
enum Part {
    Text(String),
    Tag { expr: String, filters: Vec<String> },
    Comment(String),
    Raw(String),
}

impl Part {
    fn render(&self) -> String {
        match self {
            Part::Text(text) => text.clone(),
            Part::Tag { expr, filters } => {
                let mut out = format!("{{{{ {}", expr);
                for filter in filters {
                    out.push_str(" |> ");
                    out.push_str(filter);
                }
                out.push_str(" }}");
                out
            }
            Part::Comment(body) => format!("{{{{#{}#}}}}", body),
            Part::Raw(body) => format!("{{{{raw}}}}{}{{{{/raw}}}}", body),
        }
    }
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z <>\n.,]{1,12}"
}

fn expr_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_.]{0,8}".prop_filter("`{{ raw }}` opens a raw block", |s| s != "raw"),
        "\"[a-z }{|>]{0,6}\"",
        "'[a-z }{|>]{0,6}'",
        "[a-z]{1,4}\\(\\{ [a-z]{1,3}: [0-9]{1,2} \\}\\)",
    ]
}

fn part_strategy() -> impl Strategy<Value = Part> {
    prop_oneof![
        text_strategy().prop_map(Part::Text),
        (
            expr_strategy(),
            prop::collection::vec("[a-z]{1,6}", 0..3)
        )
            .prop_map(|(expr, filters)| Part::Tag { expr, filters }),
        "[a-z {}]{0,10}".prop_map(Part::Comment),
        "[a-z {}|>]{0,10}".prop_map(Part::Raw),
    ]
}

/// Renders the parts and lists the `(kind, text)` pairs they should lex to.
/// Adjacent text parts merge into one token.
fn expected(parts: &[Part]) -> (String, Vec<(TokenKind, String)>) {
    let mut source = String::new();
    let mut tokens: Vec<(TokenKind, String)> = Vec::new();

    for part in parts {
        source.push_str(&part.render());
        match part {
            Part::Text(text) => match tokens.last_mut() {
                Some((TokenKind::Text, prev)) => prev.push_str(text),
                _ => tokens.push((TokenKind::Text, text.clone())),
            },
            Part::Tag { expr, filters } => {
                tokens.push((TokenKind::Tag, expr.clone()));
                for filter in filters {
                    tokens.push((TokenKind::Filter, filter.clone()));
                }
            }
            Part::Comment(body) => tokens.push((TokenKind::Comment, body.clone())),
            Part::Raw(body) => tokens.push((TokenKind::Raw, body.clone())),
        }
    }

    (source, tokens)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Lexing arbitrary input never panics, with any options.
    #[test]
    fn never_panics(
        source in any::<String>(),
        strict in any::<bool>(),
        outermost in any::<bool>(),
        escapes in any::<bool>(),
    ) {
        let mut options = LexerOptions::new();
        if escapes {
            options = options.backslash_escapes();
        }
        if strict {
            options = options.strict_comments();
        }
        if outermost {
            options = options.outermost_filters();
        }
        let _ = Lexer::with_options(options).tokenize(&source);
    }

    /// Template-like noise never panics either.
    #[test]
    fn never_panics_on_template_noise(source in "[{}|>\\-#a `$'\"/*\\\\]{0,40}") {
        let _ = tokenize(&source);
    }

    /// Source without `{{` is a single text token equal to the input.
    #[test]
    fn brace_free_source_is_one_text_token(source in "[^{]{1,60}") {
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Text);
        prop_assert_eq!(tokens[0].text, source.as_str());
    }

    /// Every token's span slices the source to exactly its text.
    #[test]
    fn spans_match_text(source in "[{}|>\\-#a `'\" ]{0,40}") {
        if let Ok(tokens) = tokenize(&source) {
            for token in tokens {
                prop_assert_eq!(&source[token.span.start..token.span.end], token.text);
            }
        }
    }

    /// Spans are ordered and never overlap.
    #[test]
    fn spans_are_ordered(parts in prop::collection::vec(part_strategy(), 0..8)) {
        let (source, _) = expected(&parts);
        let tokens = tokenize(&source).unwrap();
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    /// No emitted text token is empty.
    #[test]
    fn no_empty_text_tokens(source in "[{}\\- a-]{0,40}") {
        if let Ok(tokens) = tokenize(&source) {
            for token in tokens.iter().filter(|t| t.kind == TokenKind::Text) {
                prop_assert!(!token.text.is_empty());
            }
        }
    }

    /// Generated templates lex back into the parts they were built from.
    #[test]
    fn generated_templates_roundtrip(parts in prop::collection::vec(part_strategy(), 0..8)) {
        let (source, want) = expected(&parts);
        let got: Vec<(TokenKind, String)> = tokenize(&source)
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.text.to_string()))
            .collect();
        prop_assert_eq!(got, want);
    }

    /// A tag that never closes fails the whole call.
    #[test]
    fn unclosed_tag_is_an_error(expr in "[a-z .]{0,10}") {
        let source = format!("{{{{ {}", expr);
        prop_assert!(tokenize(&source).is_err());
    }
}
