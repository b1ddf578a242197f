//! Declaration-only scan of `grammar.js`.
//!
//! Tracks delimiter nesting over the token stream and records:
//! - the top-level keys of the `rules` object inside `grammar({...})` as
//!   declarations,
//! - every `$.name` as a reference,
//! - the configuration's `name: "..."`.
//!
//! Nothing is evaluated. Helper objects outside the configuration and nested
//! objects inside rule bodies never contribute declarations.

use std::ops::Range;

use parity_core::{RuleDecl, StructuralGrammar};
use rowan::{TextRange, TextSize};

use super::lexer::{JsKind, JsToken, lex};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Result of scanning one `grammar.js` source.
#[derive(Debug, Clone)]
pub struct Scan {
    pub grammar: StructuralGrammar,
    pub diagnostics: Diagnostics,
}

/// Never fails: a source without a recognizable `rules` object yields an
/// empty grammar and a warning.
pub fn scan(source: &str) -> Scan {
    let tokens = lex(source);

    let mut scanner = Scanner::new(source, &tokens, Mode::GrammarCall);
    scanner.run();
    if !scanner.saw_grammar_call {
        scanner = Scanner::new(source, &tokens, Mode::FirstRulesObject);
        scanner.run();
    }
    scanner.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Rules live in the configuration object of `grammar(...)`.
    GrammarCall,
    /// No `grammar(...)` call: take the first `rules: {...}` anywhere.
    FirstRulesObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Plain,
    GrammarCall,
    Config,
    Rules,
}

#[derive(Debug, Clone)]
struct Frame {
    open: JsKind,
    role: Role,
    span: Range<usize>,
}

struct Scanner<'s> {
    source: &'s str,
    tokens: &'s [JsToken],
    mode: Mode,
    stack: Vec<Frame>,
    grammar: StructuralGrammar,
    diagnostics: Diagnostics,
    saw_grammar_call: bool,
    config_seen: bool,
    rules_seen: bool,
}

impl<'s> Scanner<'s> {
    fn new(source: &'s str, tokens: &'s [JsToken], mode: Mode) -> Self {
        Self {
            source,
            tokens,
            mode,
            stack: Vec::new(),
            grammar: StructuralGrammar::default(),
            diagnostics: Diagnostics::new(),
            saw_grammar_call: false,
            config_seen: false,
            rules_seen: false,
        }
    }

    fn run(&mut self) {
        for i in 0..self.tokens.len() {
            let token = &self.tokens[i];
            match token.kind {
                JsKind::ParenOpen => {
                    let role = self.paren_role(i);
                    self.open(i, role);
                }
                JsKind::BraceOpen => {
                    let role = self.brace_role(i);
                    self.open(i, role);
                }
                JsKind::BracketOpen => self.open(i, Role::Plain),
                JsKind::ParenClose | JsKind::BraceClose | JsKind::BracketClose => self.close(i),
                JsKind::Ident | JsKind::String => {
                    self.declaration(i);
                    self.grammar_name(i);
                    self.reference(i);
                }
                _ => {}
            }
        }
    }

    fn finish(mut self) -> Scan {
        for frame in std::mem::take(&mut self.stack) {
            self.diagnostics
                .report(DiagnosticKind::UnbalancedDelimiter, text_range(&frame.span))
                .message(format!("`{}` is never closed", opener_text(frame.open)))
                .emit();
        }
        if !self.rules_seen {
            let message = match self.mode {
                Mode::GrammarCall => "the `grammar(...)` configuration has no `rules` object",
                Mode::FirstRulesObject => "no `grammar(...)` call and no `rules` object found",
            };
            self.diagnostics
                .report(DiagnosticKind::MissingRulesObject, TextRange::empty(TextSize::from(0)))
                .message(message)
                .emit();
        }
        Scan {
            grammar: self.grammar,
            diagnostics: self.diagnostics,
        }
    }

    fn kind_at(&self, i: Option<usize>) -> Option<JsKind> {
        i.and_then(|i| self.tokens.get(i)).map(|t| t.kind)
    }

    fn text_at(&self, i: usize) -> &'s str {
        self.tokens[i].text(self.source)
    }

    /// Key text of an identifier or string token, quotes removed.
    fn key_at(&self, i: usize) -> Option<&'s str> {
        let token = self.tokens.get(i)?;
        match token.kind {
            JsKind::Ident => Some(token.text(self.source)),
            JsKind::String => {
                let text = token.text(self.source);
                Some(&text[1..text.len() - 1])
            }
            _ => None,
        }
    }

    fn top_role(&self) -> Role {
        self.stack.last().map_or(Role::Plain, |f| f.role)
    }

    /// Token `i` starts an object member: preceded by `{` or `,`.
    fn at_member_start(&self, i: usize) -> bool {
        matches!(
            self.kind_at(i.checked_sub(1)),
            Some(JsKind::BraceOpen | JsKind::Comma)
        )
    }

    /// `key: {` with the brace at `i`.
    fn follows_key(&self, i: usize, key: &str) -> bool {
        i >= 2
            && self.kind_at(Some(i - 1)) == Some(JsKind::Colon)
            && self.key_at(i - 2) == Some(key)
            && self.at_member_start(i - 2)
    }

    fn paren_role(&mut self, i: usize) -> Role {
        let is_grammar_call = self.mode == Mode::GrammarCall
            && !self.saw_grammar_call
            && self.kind_at(i.checked_sub(1)) == Some(JsKind::Ident)
            && self.text_at(i - 1) == "grammar";
        if is_grammar_call {
            self.saw_grammar_call = true;
            Role::GrammarCall
        } else {
            Role::Plain
        }
    }

    fn brace_role(&mut self, i: usize) -> Role {
        match (self.mode, self.top_role()) {
            (Mode::GrammarCall, Role::GrammarCall) if !self.config_seen => {
                self.config_seen = true;
                Role::Config
            }
            (Mode::GrammarCall, Role::Config) if !self.rules_seen && self.follows_key(i, "rules") => {
                self.rules_seen = true;
                Role::Rules
            }
            (Mode::FirstRulesObject, _) if !self.rules_seen && self.follows_key(i, "rules") => {
                self.rules_seen = true;
                Role::Rules
            }
            _ => Role::Plain,
        }
    }

    fn open(&mut self, i: usize, role: Role) {
        let token = &self.tokens[i];
        self.stack.push(Frame {
            open: token.kind,
            role,
            span: token.span.clone(),
        });
    }

    fn close(&mut self, i: usize) {
        let token = &self.tokens[i];
        let want = match token.kind {
            JsKind::ParenClose => JsKind::ParenOpen,
            JsKind::BraceClose => JsKind::BraceOpen,
            _ => JsKind::BracketOpen,
        };
        let Some(pos) = self.stack.iter().rposition(|f| f.open == want) else {
            self.diagnostics
                .report(DiagnosticKind::UnbalancedDelimiter, text_range(&token.span))
                .message(format!("`{}` has no matching opener", token.text(self.source)))
                .emit();
            return;
        };
        for frame in self.stack.drain(pos + 1..) {
            self.diagnostics
                .report(DiagnosticKind::UnbalancedDelimiter, text_range(&frame.span))
                .message(format!("`{}` is never closed", opener_text(frame.open)))
                .related_to("enclosing delimiter closed here", text_range(&token.span))
                .emit();
        }
        self.stack.pop();
    }

    /// `name: ...` or `name($) {...}` directly inside the rules object.
    fn declaration(&mut self, i: usize) {
        if self.top_role() != Role::Rules || !self.at_member_start(i) {
            return;
        }
        if !matches!(
            self.kind_at(Some(i + 1)),
            Some(JsKind::Colon | JsKind::ParenOpen)
        ) {
            return;
        }
        let Some(name) = self.key_at(i) else {
            return;
        };
        let span = self.tokens[i].span.clone();
        let previous = self.grammar.declare(RuleDecl::new(name, Some(span.clone())));
        if let Some(previous) = previous {
            let mut report = self
                .diagnostics
                .report(DiagnosticKind::DuplicateRule, text_range(&span))
                .message(format!("rule `{name}` is declared more than once"));
            if let Some(first) = previous.span {
                report = report.related_to("previously declared here", text_range(&first));
            }
            report.emit();
        }
    }

    /// `name: "stata"` directly inside the configuration object.
    fn grammar_name(&mut self, i: usize) {
        if self.top_role() != Role::Config
            || self.tokens[i].kind != JsKind::Ident
            || self.text_at(i) != "name"
            || !self.at_member_start(i)
            || self.kind_at(Some(i + 1)) != Some(JsKind::Colon)
            || self.kind_at(Some(i + 2)) != Some(JsKind::String)
        {
            return;
        }
        self.grammar.name = self.key_at(i + 2).map(str::to_string);
    }

    /// `$.name`
    fn reference(&mut self, i: usize) {
        if self.tokens[i].kind != JsKind::Ident
            || self.text_at(i) != "$"
            || self.kind_at(Some(i + 1)) != Some(JsKind::Dot)
            || self.kind_at(Some(i + 2)) != Some(JsKind::Ident)
        {
            return;
        }
        let name = self.text_at(i + 2);
        self.grammar.reference(name);
    }
}

fn opener_text(kind: JsKind) -> &'static str {
    match kind {
        JsKind::ParenOpen => "(",
        JsKind::BraceOpen => "{",
        _ => "[",
    }
}

fn text_range(span: &Range<usize>) -> TextRange {
    TextRange::new((span.start as u32).into(), (span.end as u32).into())
}
