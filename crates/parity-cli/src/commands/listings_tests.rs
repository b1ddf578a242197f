use indoc::indoc;
use parity_core::ScopeGrammar;
use parity_core::colors::Colors;
use parity_lib::HighlightQueries;
use parity_lib::grammar_js::scan;

use super::captures::{CaptureRow, capture_rows, render_captures};
use super::rules::RulesListing;
use super::scopes::{render_scopes, select_scopes};

const REFERENCE: &str = r#"{
  "scopeName": "source.stata",
  "patterns": [
    { "name": "keyword.other.stata" },
    { "name": "keyword.control.stata" }
  ],
  "repository": {
    "strings": { "name": "string.quoted.double.stata" }
  }
}"#;

const HIGHLIGHTS: &str = indoc! {r#"
    ((identifier) @keyword
      (#match? @keyword "^(in|using)$"))

    ["if" "else"] @keyword.control
    (double_string) @string
"#};

#[test]
fn rules_listing() {
    let scan = scan(indoc! {"
        module.exports = grammar({
          name: 'stata',
          rules: {
            source_file: $ => repeat(choice($.command, $.local_macro)),
            command: $ => /[a-z]+/,
          },
        });
    "});
    let listing = RulesListing::new(&scan.grammar);

    insta::assert_snapshot!(listing.render(Colors::OFF), @r"
    stata: 2 rules
      source_file
      command
    referenced but not declared:
      local_macro
    ");
    insta::assert_snapshot!(serde_json::to_string(&listing).unwrap(), @r#"{"name":"stata","rules":["source_file","command"],"undeclared":["local_macro"]}"#);
}

#[test]
fn scopes_listing_aligns_paths() {
    let reference = ScopeGrammar::from_json(REFERENCE).unwrap();
    let decls = select_scopes(&reference, None);

    insta::assert_snapshot!(render_scopes(&decls, Colors::OFF), @r"
    source.stata                scopeName
    keyword.other.stata         patterns[0]
    keyword.control.stata       patterns[1]
    string.quoted.double.stata  repository.strings
    ");
}

#[test]
fn scopes_listing_with_prefix() {
    let reference = ScopeGrammar::from_json(REFERENCE).unwrap();
    let decls = select_scopes(&reference, Some("keyword"));

    insta::assert_snapshot!(render_scopes(&decls, Colors::OFF), @r"
    keyword.other.stata    patterns[0]
    keyword.control.stata  patterns[1]
    ");
    assert!(select_scopes(&reference, Some("keyword.oth")).is_empty());
}

#[test]
fn empty_scopes_listing() {
    assert_eq!(render_scopes(&[], Colors::OFF), "");
}

#[test]
fn captures_listing() {
    let queries = HighlightQueries::parse(HIGHLIGHTS);
    let rows = capture_rows(&queries, None);

    assert_eq!(
        render_captures(&rows, Colors::OFF),
        concat!(
            "   1  (identifier) @keyword\n",
            "   4  \"if\" @keyword.control\n",
            "   4  \"else\" @keyword.control\n",
            "   5  (double_string) @string\n",
        )
    );
}

#[test]
fn captures_listing_by_node() {
    let queries = HighlightQueries::parse(HIGHLIGHTS);
    let rows = capture_rows(&queries, Some("double_string"));
    assert_eq!(
        rows,
        [CaptureRow {
            line: 5,
            node: "double_string",
            named: true,
            capture: "string",
        }]
    );
}

#[test]
fn colored_captures_listing() {
    let queries = HighlightQueries::parse("(comment) @comment\n");
    let rows = capture_rows(&queries, None);
    assert_eq!(
        render_captures(&rows, Colors::ON),
        "\x1b[2m   1\x1b[0m  (comment) \x1b[34m@comment\x1b[0m\n"
    );
}
