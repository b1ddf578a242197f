use indoc::indoc;
use parity_core::ScopeGrammar;

use crate::grammar_js::scan;
use crate::predicates::{capture_accepts, contains, has_capture, has_predicate, has_rule, has_scope};
use crate::query::HighlightQueries;

const HIGHLIGHTS: &str = indoc! {r#"
    ((identifier) @keyword
      (#match? @keyword "^(in|using|do|run|include)$"))

    ["if" "else"] @keyword

    ((identifier) @constant.builtin
      (#any-of? @constant.builtin "_n" "_N" "_pi"))

    ((identifier) @variable
      (#not-match? @variable "^_"))

    (double_string) @string
"#};

#[test]
fn has_scope_matches_whole_names() {
    let reference = ScopeGrammar::from_json(
        r#"{ "patterns": [{ "name": "keyword.other.special.stata meta.command.stata" }] }"#,
    )
    .unwrap();
    assert!(has_scope(&reference, "keyword.other.special.stata"));
    assert!(has_scope(&reference, "meta.command.stata"));
    assert!(!has_scope(&reference, "keyword.other"));
    assert!(!has_scope(&reference, "keyword.other.special.stata meta.command.stata"));
}

#[test]
fn has_scope_finds_nested_captures() {
    let reference = ScopeGrammar::from_json(indoc! {r##"
        {
          "repository": {
            "macros": {
              "patterns": [{
                "begin": "\\$\\{",
                "beginCaptures": { "0": { "name": "punctuation.definition.macro.begin.stata" } },
                "patterns": [{ "include": "#macros" }]
              }]
            }
          }
        }
    "##})
    .unwrap();
    assert!(has_scope(&reference, "punctuation.definition.macro.begin.stata"));
}

#[test]
fn has_rule_ignores_references() {
    let grammar = scan(indoc! {"
        module.exports = grammar({
          name: 'stata',
          rules: {
            source_file: $ => repeat($.double_string),
            double_string: $ => seq('\"', $._string_content, '\"'),
          },
        });
    "})
    .grammar;
    assert!(has_rule(&grammar, "double_string"));
    assert!(!has_rule(&grammar, "doublestring"));
    assert!(!has_rule(&grammar, "_string_content"));
    assert!(!has_rule(&grammar, "stata"));
}

#[test]
fn has_capture_accepts_marker() {
    let queries = HighlightQueries::parse(HIGHLIGHTS);
    assert!(has_capture(&queries, "double_string", "string"));
    assert!(has_capture(&queries, "double_string", "@string"));
    assert!(!has_capture(&queries, "double_string", "constant"));
    assert!(has_capture(&queries, "identifier", "keyword"));
    assert!(has_capture(&queries, "if", "keyword"));
}

#[test]
fn has_predicate_needs_exact_argument() {
    let queries = HighlightQueries::parse(HIGHLIGHTS);
    let regex = "^(in|using|do|run|include)$";
    assert!(has_predicate(&queries, "keyword", "match?", regex));
    assert!(has_predicate(&queries, "@keyword", "#match?", regex));
    assert!(!has_predicate(&queries, "keyword", "match?", "^(in|using)$"));
    assert!(!has_predicate(&queries, "variable", "match?", regex));
    assert!(has_predicate(&queries, "constant.builtin", "any-of?", "_pi"));
}

#[test]
fn capture_without_restriction_fails_stricter_check() {
    let queries = HighlightQueries::parse("(identifier) @keyword\n");
    assert!(has_capture(&queries, "identifier", "keyword"));
    assert!(!has_predicate(
        &queries,
        "keyword",
        "match?",
        "^(in|using|do|run|include)$"
    ));
}

#[test]
fn capture_accepts_any_admitting_pattern() {
    let queries = HighlightQueries::parse(HIGHLIGHTS);
    assert!(capture_accepts(&queries, "keyword", "using"));
    // `["if" "else"] @keyword` has no text predicates
    assert!(capture_accepts(&queries, "keyword", "generate"));
    assert!(capture_accepts(&queries, "constant.builtin", "_N"));
    assert!(!capture_accepts(&queries, "constant.builtin", "_b"));
    assert!(capture_accepts(&queries, "variable", "price"));
    assert!(!capture_accepts(&queries, "variable", "_rc"));
    assert!(!capture_accepts(&queries, "function", "regress"));
}

#[test]
fn capture_accepts_only_restricted_pattern() {
    let queries = HighlightQueries::parse(indoc! {r#"
        ((identifier) @keyword
          (#match? @keyword "^(in|using|do|run|include)$"))
    "#});
    assert!(capture_accepts(&queries, "@keyword", "include"));
    assert!(!capture_accepts(&queries, "keyword", "included"));
}

#[test]
fn contains_is_raw_substring() {
    assert!(contains("(double_string) @string", "(double_string) @string"));
    assert!(!contains("(double_string)  @string", "(double_string) @string"));
}
