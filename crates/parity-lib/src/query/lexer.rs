//! Lexer for highlight queries.
//!
//! Tokens carry spans only. A run of bytes logos cannot match becomes one
//! `Garbage` token, so an unterminated string shows up as a single bad token
//! starting at its opening quote.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    fn at(kind: SyntaxKind, span: Range<usize>) -> Self {
        let offset = |n: usize| TextSize::from(n as u32);
        Self {
            kind,
            span: TextRange::new(offset(span.start), offset(span.end)),
        }
    }
}

/// Tokenizes a query document, trivia included.
///
/// String literals come out as three tokens (quote, `StrVal`, quote) so the
/// parser can point at a missing closing quote.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage: Option<Range<usize>> = None;

    for (kind, span) in SyntaxKind::lexer(source).spanned() {
        let Ok(kind) = kind else {
            garbage = Some(match garbage {
                Some(run) => run.start..span.end,
                None => span,
            });
            continue;
        };
        if let Some(run) = garbage.take() {
            tokens.push(Token::at(SyntaxKind::Garbage, run));
        }
        match kind {
            SyntaxKind::StringLiteral => push_string(&mut tokens, span),
            kind => tokens.push(Token::at(kind, span)),
        }
    }
    if let Some(run) = garbage {
        tokens.push(Token::at(SyntaxKind::Garbage, run));
    }

    tokens
}

/// `""` has no `StrVal` token between its quotes.
fn push_string(tokens: &mut Vec<Token>, span: Range<usize>) {
    let close = span.end - 1;
    tokens.push(Token::at(SyntaxKind::DoubleQuote, span.start..span.start + 1));
    if close > span.start + 1 {
        tokens.push(Token::at(SyntaxKind::StrVal, span.start + 1..close));
    }
    tokens.push(Token::at(SyntaxKind::DoubleQuote, close..span.end));
}

pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
