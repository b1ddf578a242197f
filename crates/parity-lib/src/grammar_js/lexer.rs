//! Token stream for `grammar.js` sources.
//!
//! Only what the declaration scanner needs: delimiters, identifiers, string
//! keys and enough of JavaScript's literal syntax (strings, templates, regex
//! literals, comments) that their contents never look like delimiters.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    #[token("...")]
    Spread,

    #[token("=>")]
    Arrow,

    /// Always division here; regex literals are recognized in [`lex`].
    #[token("/")]
    Slash,

    #[regex(r"[=!&|?+\-*%<>~^]+")]
    Operator,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    String,

    #[regex(r"`(?:[^`\\]|\\.)*`")]
    Template,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    /// Produced by [`lex`], never by logos directly.
    Regex,

    /// Coalesced unrecognized characters
    Garbage,
}

impl JsKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            JsKind::Whitespace | JsKind::Newline | JsKind::LineComment | JsKind::BlockComment
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsToken {
    pub kind: JsKind,
    pub span: Range<usize>,
}

impl JsToken {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenizes `grammar.js`, dropping trivia.
///
/// A `/` starts a regex literal when the previous significant token cannot end
/// an expression: `(`, `,`, `:`, `[`, `{`, `}`, `;`, `=>`, an operator, the
/// `return` keyword, or nothing at all. Consecutive lexer errors are coalesced
/// into single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<JsToken> {
    let mut tokens: Vec<JsToken> = Vec::new();
    let mut lexer = JsKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    tokens.push(JsToken {
                        kind: JsKind::Garbage,
                        span: start..span.start,
                    });
                }
                if kind.is_trivia() {
                    continue;
                }
                if kind == JsKind::Slash
                    && regex_allowed(source, tokens.last())
                    && let Some(len) = regex_literal_len(&source[span.start..])
                {
                    lexer.bump(len - 1);
                    tokens.push(JsToken {
                        kind: JsKind::Regex,
                        span: span.start..span.start + len,
                    });
                    continue;
                }
                tokens.push(JsToken { kind, span });
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(JsToken {
                        kind: JsKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

fn regex_allowed(source: &str, previous: Option<&JsToken>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    match previous.kind {
        JsKind::ParenOpen
        | JsKind::Comma
        | JsKind::Colon
        | JsKind::BracketOpen
        | JsKind::BraceOpen
        | JsKind::BraceClose
        | JsKind::Semicolon
        | JsKind::Arrow
        | JsKind::Operator
        | JsKind::Spread => true,
        JsKind::Ident => matches!(previous.text(source), "return" | "typeof" | "case"),
        _ => false,
    }
}

/// Byte length of the regex literal at the start of `rest` (which begins with
/// `/`), flags included. `None` when the line ends before the closing slash.
fn regex_literal_len(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut escaped = false;
    let mut chars = rest.char_indices().skip(1);
    let body_end = loop {
        let (i, c) = chars.next()?;
        match c {
            '\n' => return None,
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break i + 1,
            _ => {}
        }
    };
    let flags = rest[body_end..]
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    Some(body_end + flags)
}
