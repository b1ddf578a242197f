//! Highlight query documents (`queries/highlights.scm`).
//!
//! # Architecture
//!
//! The query source is parsed into a lossless concrete syntax tree via Rowan's
//! green tree builder, then the top-level patterns are lowered into capture
//! pairs and predicate clauses.
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: quantifiers and captures wrap the pattern before them
//!
//! The parser is resilient and always produces a tree: unknown tokens are
//! wrapped in `Error` nodes, missing delimiters become diagnostics. A broken
//! highlight file therefore still answers capture questions for the parts
//! that parse.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod patterns;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod patterns_tests;

use std::fmt::Write;

use indexmap::IndexSet;
use rowan::{GreenNode, NodeOrToken};

pub use ast::Root;
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use patterns::{CapturePair, Pattern, PredicateArg, PredicateClause};

use crate::diagnostics::Diagnostics;
use core::Parser;
use lexer::lex;

/// Parses query source into a green tree plus syntax diagnostics.
pub fn parse(source: &str) -> (GreenNode, Diagnostics) {
    let mut parser = Parser::new(source, lex(source));
    parser.parse_root();
    parser.finish()
}

/// A parsed highlight query document.
#[derive(Debug, Clone)]
pub struct HighlightQueries {
    source: String,
    cst: GreenNode,
    diagnostics: Diagnostics,
    patterns: Vec<Pattern>,
}

impl HighlightQueries {
    /// Never fails: syntax errors become diagnostics.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let (cst, mut diagnostics) = parse(&source);
        let patterns = Root::cast(SyntaxNode::new_root(cst.clone()))
            .map(|root| patterns::collect(&root, &mut diagnostics))
            .unwrap_or_default();
        Self {
            source,
            cst,
            diagnostics,
            patterns,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn captures(&self) -> impl Iterator<Item = &CapturePair> {
        self.patterns.iter().flat_map(|p| p.captures.iter())
    }

    /// Captures attached to `node_type`, in document order.
    pub fn captures_of<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a CapturePair> {
        self.captures().filter(move |c| c.node_type == node_type)
    }

    /// Distinct capture names, in first-seen order.
    pub fn capture_names(&self) -> Vec<&str> {
        self.captures()
            .map(|c| c.capture.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct node types carrying at least one capture.
    pub fn captured_node_types(&self) -> Vec<&str> {
        self.captures()
            .map(|c| c.node_type.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether some pattern attaches `@capture` to a `node_type` node.
    pub fn has_capture(&self, node_type: &str, capture: &str) -> bool {
        self.captures_of(node_type).any(|c| c.capture == capture)
    }

    /// Indented CST dump without trivia.
    pub fn dump_cst(&self) -> String {
        let mut out = String::new();
        format_cst(&self.syntax(), 0, &mut out).expect("String write never fails");
        out
    }
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            NodeOrToken::Token(t) => {
                if !t.kind().is_trivia() {
                    writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
                }
            }
        }
    }
    Ok(())
}
