//! Capture pairs and predicate clauses of top-level query patterns.

use regex_automata::meta::Regex;
use rowan::TextRange;

use super::ast::{self, Expr, Root};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// A `(node) @capture` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePair {
    /// Node type the capture attaches to. `_` for wildcards.
    pub node_type: String,
    /// `false` for anonymous nodes written as string literals.
    pub named: bool,
    /// Capture name without `@`.
    pub capture: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateArg {
    Capture(String),
    String(String),
    Ident(String),
}

impl PredicateArg {
    pub fn as_capture(&self) -> Option<&str> {
        match self {
            PredicateArg::Capture(name) => Some(name),
            _ => None,
        }
    }

    /// Literal text of string and identifier arguments.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PredicateArg::String(s) | PredicateArg::Ident(s) => Some(s),
            PredicateArg::Capture(_) => None,
        }
    }
}

/// `(#name args...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateClause {
    /// Name without `#`, e.g. `match?`.
    pub name: String,
    pub args: Vec<PredicateArg>,
    pub range: TextRange,
}

impl PredicateClause {
    /// The capture this clause constrains, if its first argument is one.
    pub fn subject(&self) -> Option<&str> {
        self.args.first().and_then(PredicateArg::as_capture)
    }

    /// Whether `text` passes this clause when bound to `capture`.
    ///
    /// `None` when the clause does not restrict `capture`'s text or cannot be
    /// evaluated without a syntax tree (e.g. `#eq? @a @b`).
    pub fn accepts(&self, capture: &str, text: &str) -> Option<bool> {
        if self.subject() != Some(capture) {
            return None;
        }
        let rest = &self.args[1..];
        let (test, negated) = text_test(&self.name);
        let accepted = match test {
            "match?" => {
                let pattern = rest.first()?.as_text()?;
                Regex::new(pattern).is_ok_and(|re| re.is_match(text))
            }
            "eq?" => rest.first()?.as_text()? == text,
            "any-of?" => rest
                .iter()
                .filter_map(PredicateArg::as_text)
                .any(|s| s == text),
            _ => return None,
        };
        Some(accepted != negated)
    }
}

/// Splits a predicate name into its text test and whether it is negated.
///
/// A word stands for a single captured node, so `#any-eq?` and the other
/// `any-` forms test the same as their plain forms. `any-of?` is a test of
/// its own.
fn text_test(name: &str) -> (&str, bool) {
    let name = match name.strip_prefix("any-") {
        Some(rest) if rest != "of?" => rest,
        _ => name,
    };
    match name.strip_prefix("not-") {
        Some(test) => (test, true),
        None => (name, false),
    }
}

/// One top-level pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub range: TextRange,
    pub captures: Vec<CapturePair>,
    pub predicates: Vec<PredicateClause>,
}

impl Pattern {
    pub fn captures_name(&self, capture: &str) -> bool {
        self.captures.iter().any(|c| c.capture == capture)
    }

    /// `None` if this pattern never captures `capture`; otherwise whether all
    /// of its text predicates on that capture admit `text`.
    pub fn accepts(&self, capture: &str, text: &str) -> Option<bool> {
        if !self.captures_name(capture) {
            return None;
        }
        Some(
            self.predicates
                .iter()
                .all(|p| p.accepts(capture, text) != Some(false)),
        )
    }
}

pub(super) fn collect(root: &Root, diagnostics: &mut Diagnostics) -> Vec<Pattern> {
    root.exprs()
        .map(|expr| {
            let mut collector = Collector {
                pattern: Pattern {
                    range: expr.as_cst().text_range(),
                    captures: Vec::new(),
                    predicates: Vec::new(),
                },
                diagnostics: &mut *diagnostics,
            };
            collector.walk(&expr);
            collector.pattern
        })
        .collect()
}

struct Collector<'d> {
    pattern: Pattern,
    diagnostics: &'d mut Diagnostics,
}

impl Collector<'_> {
    fn walk(&mut self, expr: &Expr) {
        match expr {
            Expr::Capture(capture) => {
                let inner = capture.inner();
                let targets = inner.as_ref().map(targets).unwrap_or_default();
                let range = capture.as_cst().text_range();
                for name in capture.names() {
                    for (node_type, named) in &targets {
                        self.pattern.captures.push(CapturePair {
                            node_type: node_type.clone(),
                            named: *named,
                            capture: name.clone(),
                            range,
                        });
                    }
                }
                if let Some(inner) = inner {
                    self.walk(&inner);
                }
            }
            Expr::Tree(tree) => {
                for child in tree.children() {
                    self.walk(&child);
                }
                for predicate in tree.predicates() {
                    self.predicate(&predicate);
                }
            }
            Expr::Group(group) => {
                for child in group.children() {
                    self.walk(&child);
                }
                for predicate in group.predicates() {
                    self.predicate(&predicate);
                }
            }
            Expr::Alt(alt) => {
                for branch in alt.branches() {
                    self.walk(&branch);
                }
            }
            Expr::Field(field) => {
                if let Some(value) = field.value() {
                    self.walk(&value);
                }
            }
            Expr::Quantifier(quantifier) => {
                if let Some(inner) = quantifier.inner() {
                    self.walk(&inner);
                }
            }
            Expr::Str(_) | Expr::Wildcard(_) | Expr::NegatedField(_) | Expr::Anchor(_) => {}
        }
    }

    fn predicate(&mut self, predicate: &ast::Predicate) {
        let Some(name) = predicate.name() else {
            return;
        };
        let args: Vec<PredicateArg> = predicate
            .args()
            .map(|arg| match arg {
                ast::PredicateArg::Capture(t) => {
                    PredicateArg::Capture(t.text().trim_start_matches('@').to_string())
                }
                ast::PredicateArg::Str(s) => PredicateArg::String(s.value()),
                ast::PredicateArg::Ident(t) => PredicateArg::Ident(t.text().to_string()),
            })
            .collect();

        if text_test(&name).0 == "match?"
            && let Some(ast::PredicateArg::Str(regex)) = predicate.args().nth(1)
        {
            let value = regex.value();
            if let Err(err) = regex_syntax::parse(&value) {
                self.diagnostics
                    .report(DiagnosticKind::InvalidPredicateRegex, regex.as_cst().text_range())
                    .message(format!("`#{name}` regex does not compile: {}", error_summary(&err)))
                    .emit();
            }
        }

        self.pattern.predicates.push(PredicateClause {
            name,
            args,
            range: predicate.as_cst().text_range(),
        });
    }
}

/// Node types a capture on `expr` attaches to.
fn targets(expr: &Expr) -> Vec<(String, bool)> {
    match expr {
        Expr::Tree(tree) => tree
            .matched_type()
            .map(|t| vec![(t.text().to_string(), true)])
            .unwrap_or_default(),
        Expr::Str(s) => vec![(s.value(), false)],
        Expr::Wildcard(_) => vec![("_".to_string(), false)],
        Expr::Alt(alt) => alt.branches().flat_map(|b| targets(&b)).collect(),
        Expr::Quantifier(q) => q.inner().map(|i| targets(&i)).unwrap_or_default(),
        Expr::Field(f) => f.value().map(|v| targets(&v)).unwrap_or_default(),
        Expr::Capture(c) => c.inner().map(|i| targets(&i)).unwrap_or_default(),
        Expr::Group(_) | Expr::NegatedField(_) | Expr::Anchor(_) => Vec::new(),
    }
}

fn error_summary(err: &regex_syntax::Error) -> String {
    let text = err.to_string();
    text.lines().last().unwrap_or_default().trim().to_string()
}
