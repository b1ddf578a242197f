use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::EmptyTree, range(0, 2)).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "empty `()` is not allowed"
    );
}

#[test]
fn warnings_and_errors_are_counted_apart() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule, range(10, 23))
        .message("rule `double_string` is declared more than once")
        .related_to("first declared here", range(0, 13))
        .emit();
    diagnostics.report(DiagnosticKind::UnclosedTree, range(0, 1)).emit();

    assert_eq!(diagnostics.count(Severity::Error), 1);
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    assert!(diagnostics.has_errors());
}

#[test]
fn plain_rendering_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule, range(10, 23))
        .message("rule `double_string` is declared more than once")
        .related_to("first declared here", range(0, 13))
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning at 10..23: rule `double_string` is declared more than once (related: first declared here at 0..13)"
    );
}

#[test]
fn source_rendering_mentions_message_and_path() {
    let source = "(double_string @string";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedTree, range(0, 22))
        .emit();

    let out = diagnostics
        .printer()
        .source(source)
        .path("queries/highlights.scm")
        .render();
    assert!(out.contains("missing closing `)`"));
    assert!(out.contains("queries/highlights.scm"));
}

#[test]
fn snippets_end_with_a_count_per_file() {
    let source = "(a\n(b\n(#match? @x \"(\")";
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnclosedTree, range(0, 2)).emit();
    diagnostics.report(DiagnosticKind::UnclosedTree, range(3, 5)).emit();
    diagnostics
        .report(DiagnosticKind::InvalidPredicateRegex, range(18, 21))
        .emit();

    let out = diagnostics
        .printer()
        .source(source)
        .path("queries/highlights.scm")
        .render();
    assert!(out.ends_with("queries/highlights.scm: 2 errors, 1 warning\n"), "{out}");
    assert_eq!(out.matches("missing closing `)`").count(), 2);
}

#[test]
fn plain_lines_are_prefixed_with_the_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::MissingRulesObject, range(0, 0)).emit();
    diagnostics.report(DiagnosticKind::DuplicateRule, range(4, 8)).emit();

    insta::assert_snapshot!(diagnostics.printer().path("grammar.js").render(), @r"
    grammar.js: warning at 0..0: no `rules` object found
    grammar.js: warning at 4..8: rule is declared more than once
    ");
}

#[test]
fn empty_diagnostics_render_nothing() {
    let diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.render("(a)"), "");
}
