use indoc::indoc;

use super::{HighlightQueries, PredicateArg};
use crate::diagnostics::{DiagnosticKind, Severity};

const STATA: &str = indoc! {r#"
    ; Keywords
    ((identifier) @keyword
      (#match? @keyword "^(in|using|do|run|include)$"))

    (double_string) @string
    (compound_string) @string
    (global_macro) @variable
    (local_macro) @variable.special
    (call function: (identifier)) @function
    ["if" "else"] @keyword.control
    (comment) @comment
"#};

#[test]
fn captures_in_document_order() {
    let queries = HighlightQueries::parse(STATA);
    let pairs: Vec<String> = queries
        .captures()
        .map(|c| format!("({}) @{}", c.node_type, c.capture))
        .collect();

    insta::assert_snapshot!(pairs.join("\n"), @r"
    (identifier) @keyword
    (double_string) @string
    (compound_string) @string
    (global_macro) @variable
    (local_macro) @variable.special
    (call) @function
    (if) @keyword.control
    (else) @keyword.control
    (comment) @comment
    ");
}

#[test]
fn has_capture_is_exact() {
    let queries = HighlightQueries::parse(STATA);
    assert!(queries.has_capture("double_string", "string"));
    assert!(!queries.has_capture("double_string", "constant"));
    assert!(!queries.has_capture("double_string", "str"));
    assert!(!queries.has_capture("doublestring", "string"));
}

#[test]
fn outer_capture_targets_outer_node() {
    let queries = HighlightQueries::parse(STATA);
    assert!(queries.has_capture("call", "function"));
    assert!(!queries.has_capture("identifier", "function"));
}

#[test]
fn anonymous_nodes_are_unnamed() {
    let queries = HighlightQueries::parse(STATA);
    let pair = queries.captures_of("if").next().unwrap();
    assert!(!pair.named);
    assert_eq!(pair.capture, "keyword.control");
}

#[test]
fn distinct_capture_names() {
    let queries = HighlightQueries::parse(STATA);
    assert_eq!(
        queries.capture_names(),
        [
            "keyword",
            "string",
            "variable",
            "variable.special",
            "function",
            "keyword.control",
            "comment"
        ]
    );
}

#[test]
fn predicate_clauses_are_kept_with_their_pattern() {
    let queries = HighlightQueries::parse(STATA);
    let keyword = &queries.patterns()[0];
    assert_eq!(keyword.predicates.len(), 1);
    let clause = &keyword.predicates[0];
    assert_eq!(clause.name, "match?");
    assert_eq!(
        clause.args,
        [
            PredicateArg::Capture("keyword".into()),
            PredicateArg::String("^(in|using|do|run|include)$".into()),
        ]
    );
    assert!(queries.patterns()[1].predicates.is_empty());
}

#[test]
fn match_predicate_restricts_text() {
    let queries = HighlightQueries::parse(STATA);
    let keyword = &queries.patterns()[0];
    assert_eq!(keyword.accepts("keyword", "using"), Some(true));
    assert_eq!(keyword.accepts("keyword", "generate"), Some(false));
    assert_eq!(keyword.accepts("string", "using"), None);
}

#[test]
fn negated_and_list_predicates() {
    let source = indoc! {r#"
        ((identifier) @a (#not-match? @a "^_"))
        ((identifier) @b (#any-of? @b "in" "using"))
        ((identifier) @c (#not-eq? @c "self"))
        ((identifier) @d (#eq? @d @c))
    "#};
    let queries = HighlightQueries::parse(source);
    let p = queries.patterns();

    assert_eq!(p[0].accepts("a", "x"), Some(true));
    assert_eq!(p[0].accepts("a", "_x"), Some(false));
    assert_eq!(p[1].accepts("b", "using"), Some(true));
    assert_eq!(p[1].accepts("b", "by"), Some(false));
    assert_eq!(p[2].accepts("c", "self"), Some(false));
    // capture-to-capture comparison needs a syntax tree, so it never rejects
    assert_eq!(p[3].accepts("d", "anything"), Some(true));
}

#[test]
fn quantified_predicates_test_like_their_plain_forms() {
    let queries = HighlightQueries::parse(indoc! {r#"
        ((identifier)+ @a (#any-match? @a "^_"))
        ((identifier)+ @b (#any-not-match? @b "^_"))
        ((identifier)+ @c (#any-eq? @c "self"))
        ((identifier)+ @d (#any-not-eq? @d "self"))
        ((identifier) @e (#not-any-of? @e "in" "using"))
    "#});
    let p = queries.patterns();
    assert_eq!(p[0].accepts("a", "_n"), Some(true));
    assert_eq!(p[0].accepts("a", "n"), Some(false));
    assert_eq!(p[1].accepts("b", "_n"), Some(false));
    assert_eq!(p[1].accepts("b", "n"), Some(true));
    assert_eq!(p[2].accepts("c", "self"), Some(true));
    assert_eq!(p[2].accepts("c", "this"), Some(false));
    assert_eq!(p[3].accepts("d", "self"), Some(false));
    assert_eq!(p[4].accepts("e", "using"), Some(false));
    assert_eq!(p[4].accepts("e", "by"), Some(true));
}

#[test]
fn quantified_match_regex_is_validated() {
    let queries = HighlightQueries::parse(r#"((identifier)+ @x (#any-match? @x "(unclosed"))"#);
    let kinds: Vec<_> = queries.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::InvalidPredicateRegex]);
}

#[test]
fn unknown_predicates_are_ignored() {
    let queries = HighlightQueries::parse(r#"((identifier) @x (#set! priority 105))"#);
    assert_eq!(queries.patterns()[0].accepts("x", "foo"), Some(true));
}

#[test]
fn invalid_regex_warns_and_never_matches() {
    let queries = HighlightQueries::parse(r#"((identifier) @x (#match? @x "(unclosed"))"#);
    let diagnostics = queries.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::InvalidPredicateRegex);
    assert_eq!(diag.severity(), Severity::Warning);
    assert_eq!(queries.patterns()[0].accepts("x", "(unclosed"), Some(false));
}

#[test]
fn string_escapes_are_resolved() {
    let queries = HighlightQueries::parse(r#"((identifier) @x (#eq? @x "a\"b"))"#);
    assert_eq!(queries.patterns()[0].accepts("x", "a\"b"), Some(true));
}

#[test]
fn alternation_and_quantifier_targets() {
    let queries = HighlightQueries::parse(r#"[(global_macro) (local_macro)]+ @variable"#);
    assert!(queries.has_capture("global_macro", "variable"));
    assert!(queries.has_capture("local_macro", "variable"));
}

#[test]
fn supertype_captures_subtype() {
    let queries = HighlightQueries::parse("(expression/identifier) @variable");
    assert!(queries.has_capture("identifier", "variable"));
    assert!(!queries.has_capture("expression", "variable"));
}

#[test]
fn wildcards_capture_underscore() {
    let queries = HighlightQueries::parse("(_) @node _ @any");
    assert!(queries.has_capture("_", "node"));
    assert!(queries.has_capture("_", "any"));
}

#[test]
fn broken_document_still_answers() {
    let source = indoc! {r#"
        (double_string) @string
        (global_macro @variable
    "#};
    let queries = HighlightQueries::parse(source);
    assert!(queries.diagnostics().has_errors());
    assert!(queries.has_capture("double_string", "string"));
}

#[test]
fn captured_node_types() {
    let queries = HighlightQueries::parse("(a) @x (b) @y (a) @z");
    assert_eq!(queries.captured_node_types(), ["a", "b"]);
}
