//! Presence predicates over loaded documents.
//!
//! All of them are pure: they borrow immutable documents, never fail, and
//! answer `false` for absence.

use parity_core::{ScopeGrammar, StructuralGrammar};

use crate::query::HighlightQueries;

/// The reference grammar declares `scope` exactly.
///
/// Declaration values holding several space-separated scopes are split first.
/// `keyword.other` does not match `keyword.other.special`.
pub fn has_scope(reference: &ScopeGrammar, scope: &str) -> bool {
    reference.has_scope(scope)
}

/// `rule` is a top-level key of the grammar's `rules` object.
///
/// Names that only appear as `$.rule` inside other rules are not declarations.
pub fn has_rule(grammar: &StructuralGrammar, rule: &str) -> bool {
    grammar.has_rule(rule)
}

/// Some pattern attaches `@capture` to a `node_type` node.
///
/// A leading `@` on `capture` is accepted.
pub fn has_capture(queries: &HighlightQueries, node_type: &str, capture: &str) -> bool {
    queries.has_capture(node_type, capture.trim_start_matches('@'))
}

/// Some pattern holds `(#predicate @capture ... "argument" ...)`.
///
/// The leading `#` and `@` markers are optional on both names.
pub fn has_predicate(
    queries: &HighlightQueries,
    capture: &str,
    predicate: &str,
    argument: &str,
) -> bool {
    let capture = capture.trim_start_matches('@');
    let predicate = predicate.trim_start_matches('#');
    queries
        .patterns()
        .iter()
        .flat_map(|p| p.predicates.iter())
        .filter(|clause| clause.name == predicate && clause.subject() == Some(capture))
        .any(|clause| {
            clause.args[1..]
                .iter()
                .any(|arg| arg.as_text() == Some(argument))
        })
}

/// Some pattern capturing `@capture` has text predicates that all admit `text`.
///
/// A pattern without text predicates on the capture admits any text. The
/// captured node type is not considered.
pub fn capture_accepts(queries: &HighlightQueries, capture: &str, text: &str) -> bool {
    let capture = capture.trim_start_matches('@');
    queries
        .patterns()
        .iter()
        .filter_map(|p| p.accepts(capture, text))
        .any(|accepted| accepted)
}

/// Raw substring containment.
pub fn contains(text: &str, literal: &str) -> bool {
    text.contains(literal)
}
