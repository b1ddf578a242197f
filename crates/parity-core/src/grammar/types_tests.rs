use super::*;

#[test]
fn redeclaration_replaces_and_returns_previous() {
    let mut grammar = StructuralGrammar::new(Some("stata".into()));
    assert!(grammar.declare(RuleDecl::new("double_string", Some(0..13))).is_none());

    let previous = grammar.declare(RuleDecl::new("double_string", Some(40..53)));
    assert_eq!(previous, Some(RuleDecl::new("double_string", Some(0..13))));
    assert_eq!(grammar.rule_count(), 1);
    assert_eq!(grammar.rule("double_string").unwrap().span, Some(40..53));
}

#[test]
fn references_do_not_declare() {
    let mut grammar = StructuralGrammar::default();
    grammar.reference("doublestring");
    assert!(grammar.is_referenced("doublestring"));
    assert!(!grammar.has_rule("doublestring"));
}

#[test]
fn undeclared_references_skip_declared_names() {
    let mut grammar = StructuralGrammar::default();
    grammar.declare(RuleDecl::new("command", None));
    grammar.reference("command");
    grammar.reference("_newline");
    let undeclared: Vec<_> = grammar.undeclared_references().collect();
    assert_eq!(undeclared, ["_newline"]);
}
