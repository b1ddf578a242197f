//! Token cursor and tree builder shared by the query productions.
//!
//! Trivia is held back until the next node or token is started, so comments
//! and whitespace between patterns end up in the enclosing node rather than
//! at the tail of the node that precedes them.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Nesting deeper than this is wrapped into a single error node.
const MAX_DEPTH: u32 = 256;

pub(super) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    /// Start of the last reported range; one diagnostic per position.
    last_reported: Option<TextSize>,
    /// Spans of the `(` and `[` still waiting for their closer.
    open_delimiters: Vec<TextRange>,
}

impl<'src> Parser<'src> {
    pub(super) fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_reported: None,
            open_delimiters: Vec::new(),
        }
    }

    pub(super) fn finish(mut self) -> (GreenNode, Diagnostics) {
        self.flush_trivia();
        (self.builder.finish(), self.diagnostics)
    }

    /// Next significant token, buffering the trivia in front of it.
    fn peek(&mut self) -> Option<Token> {
        while let Some(token) = self.tokens.get(self.pos).copied() {
            if !token.kind.is_trivia() {
                return Some(token);
            }
            self.pending_trivia.push(token);
            self.pos += 1;
        }
        None
    }

    fn flush_trivia(&mut self) {
        for token in std::mem::take(&mut self.pending_trivia) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
    }

    pub(super) fn eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Kind of the next significant token; `Error` at the end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.peek().map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let source = self.source;
        self.peek().map_or("", |t| token_text(source, &t))
    }

    fn current_range(&mut self) -> TextRange {
        match self.peek() {
            Some(token) => token.span,
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        self.peek().is_some_and(|t| set.contains(t.kind))
    }

    /// Whether the `n`-th significant token from here is `kind` (`0` is current).
    pub(super) fn nth_at(&mut self, n: usize, kind: SyntaxKind) -> bool {
        self.peek();
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .is_some_and(|t| t.kind == kind)
    }

    /// Emits trivia left before the end of the enclosing node.
    pub(super) fn attach_trailing_trivia(&mut self) {
        self.peek();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.peek();
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Moves the current token into the tree. No-op at the end of input.
    pub(super) fn bump(&mut self) {
        let Some(token) = self.peek() else {
            return;
        };
        self.flush_trivia();
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let found = self.at(kind);
        if found {
            self.bump();
        }
        found
    }

    /// Consumes `kind` or reports `expected {what}` without consuming.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_with(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    /// Runs one nested production, or swallows the rest of the input once
    /// nesting reaches [`MAX_DEPTH`].
    pub(super) fn nested(&mut self, parse: impl FnOnce(&mut Self)) {
        if self.depth >= MAX_DEPTH {
            self.error_with(DiagnosticKind::UnexpectedToken, "patterns are nested too deeply");
            self.start_node(SyntaxKind::Error);
            while !self.eof() {
                self.bump();
            }
            self.finish_node();
            return;
        }
        self.depth += 1;
        parse(self);
        self.depth -= 1;
    }

    /// Remembers the current `(` or `[` before it is consumed.
    pub(super) fn open_delimiter(&mut self) {
        let range = self.current_range();
        self.open_delimiters.push(range);
    }

    /// Consumes `close`, or reports the delimiter opened last as unclosed.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind, kind: DiagnosticKind, note: &str) {
        let open = self.open_delimiters.pop();
        if self.eat(close) {
            return;
        }
        let Some(open) = open else {
            return;
        };
        let here = self.current_range();
        if self.already_reported(here) {
            return;
        }
        self.diagnostics
            .report(kind, open.cover(here))
            .related_to(note, open)
            .emit();
    }

    fn already_reported(&mut self, range: TextRange) -> bool {
        let start = range.start();
        let seen = self.last_reported == Some(start);
        self.last_reported = Some(start);
        seen
    }

    /// Reports `kind` with its default message at the current token.
    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_range();
        if !self.already_reported(range) {
            self.diagnostics.report(kind, range).emit();
        }
    }

    pub(super) fn error_with(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_range();
        if !self.already_reported(range) {
            self.diagnostics.report(kind, range).message(message).emit();
        }
    }

    /// Reports `kind` and wraps the offending token in an error node.
    pub(super) fn recover(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_error();
    }

    pub(super) fn recover_with(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_with(kind, message);
        self.bump_error();
    }

    fn bump_error(&mut self) {
        if self.eof() {
            return;
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }
}
