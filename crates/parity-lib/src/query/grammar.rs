//! Productions of the highlight query grammar.
//!
//! ```text
//! root      = (pattern)*
//! pattern   = atom quantifier? capture*
//! atom      = tree | group | predicate | alt | str | "_" | "." | field | "!" id
//! tree      = "(" (id | "_") ("/" id)? child* ")"
//! group     = "(" pattern+ ")"
//! predicate = "(" predicate_name (capture | str | id)* ")"
//! field     = id ":" pattern
//! ```

use rowan::Checkpoint;

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{PATTERN_FIRST, QUANTIFIERS};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        while !self.eof() {
            if self.at_any(PATTERN_FIRST) {
                self.parse_pattern();
                continue;
            }
            self.error_stray_token();
        }
        self.attach_trailing_trivia();
        self.finish_node();
    }

    fn parse_pattern(&mut self) {
        self.nested(|p| {
            let checkpoint = p.checkpoint();
            p.parse_atom();
            p.parse_suffixes(checkpoint);
        });
    }

    fn parse_atom(&mut self) {
        match self.current() {
            SyntaxKind::ParenOpen => self.parse_paren(),
            SyntaxKind::BracketOpen => self.parse_alt(),
            SyntaxKind::DoubleQuote => self.parse_str(),
            SyntaxKind::Underscore => self.parse_single(SyntaxKind::Wildcard),
            SyntaxKind::Dot => self.parse_single(SyntaxKind::Anchor),
            SyntaxKind::Negation => self.parse_negated_field(),
            SyntaxKind::Id if self.nth_at(1, SyntaxKind::Colon) => self.parse_field(),
            SyntaxKind::Id => {
                let text = self.current_text();
                self.recover_with(
                    DiagnosticKind::UnexpectedToken,
                    format!("bare `{text}` is not a pattern; write `({text})`"),
                );
            }
            _ => self.recover(DiagnosticKind::UnexpectedToken),
        }
    }

    /// Wraps the atom before `checkpoint` in a quantifier and then in a capture.
    fn parse_suffixes(&mut self, checkpoint: Checkpoint) {
        if self.at_any(QUANTIFIERS) {
            self.start_node_at(checkpoint, SyntaxKind::Quantifier);
            self.bump();
            self.finish_node();
        }
        if self.at(SyntaxKind::CaptureName) {
            self.start_node_at(checkpoint, SyntaxKind::Capture);
            while self.at(SyntaxKind::CaptureName) {
                self.bump();
            }
            self.finish_node();
        }
    }

    fn parse_single(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// `(type ...)` | `(_ ...)` | `(supertype/subtype ...)` | `((a) (b))` | `(#pred? ...)`
    fn parse_paren(&mut self) {
        let checkpoint = self.checkpoint();
        self.open_delimiter();
        self.bump(); // consume '('

        if self.eof() {
            self.start_node_at(checkpoint, SyntaxKind::Tree);
            self.close_paren();
            return;
        }

        match self.current() {
            SyntaxKind::ParenClose => {
                self.start_node_at(checkpoint, SyntaxKind::Tree);
                self.error(DiagnosticKind::EmptyTree);
            }
            SyntaxKind::Id | SyntaxKind::Underscore => {
                self.start_node_at(checkpoint, SyntaxKind::Tree);
                self.bump();
                if self.eat(SyntaxKind::Slash) && !self.eat(SyntaxKind::Id) {
                    self.error_with(
                        DiagnosticKind::ExpectedNodeType,
                        "expected a subtype after `/`",
                    );
                }
                self.parse_children();
            }
            SyntaxKind::PredicateName => {
                self.start_node_at(checkpoint, SyntaxKind::Predicate);
                self.bump();
                self.parse_predicate_args();
            }
            kind if PATTERN_FIRST.contains(kind) => {
                self.start_node_at(checkpoint, SyntaxKind::Group);
                self.parse_children();
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::Tree);
                self.error(DiagnosticKind::ExpectedNodeType);
                self.parse_children();
            }
        }

        self.close_paren();
    }

    fn close_paren(&mut self) {
        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedTree, "node started here");
        self.finish_node();
    }

    fn parse_children(&mut self) {
        while !self.eof() {
            if self.at(SyntaxKind::ParenClose) {
                break;
            }
            if self.at_any(PATTERN_FIRST) {
                self.parse_pattern();
                continue;
            }
            self.error_stray_token();
        }
    }

    fn parse_predicate_args(&mut self) {
        while !self.eof() {
            match self.current() {
                SyntaxKind::ParenClose => break,
                SyntaxKind::CaptureName | SyntaxKind::Id | SyntaxKind::Underscore => self.bump(),
                SyntaxKind::DoubleQuote => self.parse_str(),
                SyntaxKind::Garbage => self.error_garbage(),
                _ => self.recover_with(
                    DiagnosticKind::UnexpectedToken,
                    "predicate arguments are captures, strings or identifiers",
                ),
            }
        }
    }

    /// `[pattern ...]`
    fn parse_alt(&mut self) {
        self.start_node(SyntaxKind::Alt);
        self.open_delimiter();
        self.bump(); // consume '['

        while !self.eof() {
            if self.at(SyntaxKind::BracketClose) {
                break;
            }
            if self.at_any(PATTERN_FIRST) {
                self.parse_pattern();
                continue;
            }
            self.error_stray_token();
        }

        self.close_delimiter(
            SyntaxKind::BracketClose,
            DiagnosticKind::UnclosedAlternation,
            "alternation started here",
        );
        self.finish_node();
    }

    fn parse_str(&mut self) {
        self.start_node(SyntaxKind::Str);
        self.bump(); // opening quote
        self.eat(SyntaxKind::StrVal);
        self.expect(SyntaxKind::DoubleQuote, "closing `\"`");
        self.finish_node();
    }

    /// `name: pattern`
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::Field);
        self.bump(); // name
        self.bump(); // ':'
        if self.at_any(PATTERN_FIRST) {
            self.parse_pattern();
        } else {
            self.error(DiagnosticKind::ExpectedFieldValue);
        }
        self.finish_node();
    }

    /// `!name`
    fn parse_negated_field(&mut self) {
        self.start_node(SyntaxKind::NegatedField);
        self.bump(); // '!'
        self.expect(SyntaxKind::Id, "a field name after `!`");
        self.finish_node();
    }

    /// Consumes one token that cannot start a pattern here.
    fn error_stray_token(&mut self) {
        match self.current() {
            SyntaxKind::CaptureName => self.recover(DiagnosticKind::CaptureWithoutTarget),
            SyntaxKind::ParenClose => {
                self.recover_with(DiagnosticKind::UnexpectedToken, "unmatched `)`")
            }
            SyntaxKind::BracketClose => {
                self.recover_with(DiagnosticKind::UnexpectedToken, "unmatched `]`")
            }
            SyntaxKind::Garbage => self.error_garbage(),
            _ => self.recover(DiagnosticKind::UnexpectedToken),
        }
    }

    fn error_garbage(&mut self) {
        let text = self.current_text();
        if text.starts_with('"') {
            self.recover(DiagnosticKind::UnclosedString);
        } else {
            self.recover_with(DiagnosticKind::UnexpectedToken, format!("unexpected `{text}`"));
        }
    }
}
