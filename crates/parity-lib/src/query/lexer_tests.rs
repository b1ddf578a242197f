use super::cst::SyntaxKind;
use super::lexer::{lex, token_text};

fn snapshot(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, token_text(source, t)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn node_and_capture() {
    insta::assert_snapshot!(snapshot("(identifier) @keyword"), @r#"
    ParenOpen "("
    Id "identifier"
    ParenClose ")"
    Whitespace " "
    CaptureName "@keyword"
    "#);
}

#[test]
fn predicate_with_string() {
    insta::assert_snapshot!(snapshot(r#"(#match? @keyword "^(in|using)$")"#), @r##"
    ParenOpen "("
    PredicateName "#match?"
    Whitespace " "
    CaptureName "@keyword"
    Whitespace " "
    DoubleQuote "\""
    StrVal "^(in|using)$"
    DoubleQuote "\""
    ParenClose ")"
    "##);
}

#[test]
fn comment_and_dotted_capture() {
    insta::assert_snapshot!(snapshot("; strings\n(double_string) @string.special"), @r#"
    LineComment "; strings"
    Newline "\n"
    ParenOpen "("
    Id "double_string"
    ParenClose ")"
    Whitespace " "
    CaptureName "@string.special"
    "#);
}

#[test]
fn wildcard_versus_hidden_rule() {
    insta::assert_snapshot!(snapshot("(_) (_expression/identifier)"), @r#"
    ParenOpen "("
    Underscore "_"
    ParenClose ")"
    Whitespace " "
    ParenOpen "("
    Id "_expression"
    Slash "/"
    Id "identifier"
    ParenClose ")"
    "#);
}

#[test]
fn empty_string_has_no_value_token() {
    insta::assert_snapshot!(snapshot(r#""""#), @r#"
    DoubleQuote "\""
    DoubleQuote "\""
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("(a) $$ (b)"), @r#"
    ParenOpen "("
    Id "a"
    ParenClose ")"
    Whitespace " "
    Garbage "$$"
    Whitespace " "
    ParenOpen "("
    Id "b"
    ParenClose ")"
    "#);
}

#[test]
fn unterminated_string_starts_garbage() {
    let source = r#""abc"#;
    let tokens = lex(source);
    assert_eq!(tokens[0].kind, SyntaxKind::Garbage);
    assert!(token_text(source, &tokens[0]).starts_with('"'));
}

#[test]
fn escaped_quote_stays_inside_string() {
    let source = r#""a\"b""#;
    let kinds: Vec<_> = lex(source).iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [SyntaxKind::DoubleQuote, SyntaxKind::StrVal, SyntaxKind::DoubleQuote]
    );
}

#[test]
fn lone_underscore_is_never_an_id() {
    let source = "_ _1 __";
    let kinds: Vec<_> = lex(source)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, [SyntaxKind::Underscore, SyntaxKind::Id, SyntaxKind::Id]);
}
