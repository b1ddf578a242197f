use super::*;

#[test]
fn parse_minimal_grammar() {
    let json = r#"{
        "name": "stata",
        "rules": {
            "source_file": { "type": "SYMBOL", "name": "command" },
            "command": { "type": "STRING", "value": "display" }
        }
    }"#;

    let grammar = StructuralGrammar::from_json(json).unwrap();
    assert_eq!(grammar.name.as_deref(), Some("stata"));
    assert_eq!(grammar.rule_count(), 2);
    assert!(grammar.has_rule("source_file"));
    assert!(grammar.has_rule("command"));
}

#[test]
fn preserves_rule_order() {
    let json = r#"{
        "name": "stata",
        "rules": {
            "source_file": { "type": "BLANK" },
            "double_string": { "type": "BLANK" },
            "global_macro": { "type": "BLANK" }
        }
    }"#;

    let grammar = StructuralGrammar::from_json(json).unwrap();
    let names: Vec<_> = grammar.rule_names().collect();
    assert_eq!(names, ["source_file", "double_string", "global_macro"]);
}

#[test]
fn nested_symbols_are_references_not_declarations() {
    let json = r#"{
        "name": "stata",
        "rules": {
            "source_file": {
                "type": "REPEAT",
                "content": {
                    "type": "CHOICE",
                    "members": [
                        { "type": "SYMBOL", "name": "double_string" },
                        { "type": "FIELD", "name": "body", "content": { "type": "SYMBOL", "name": "macro" } }
                    ]
                }
            },
            "double_string": { "type": "PATTERN", "value": "\"[^\"]*\"" }
        },
        "externals": [{ "type": "SYMBOL", "name": "compound_string" }]
    }"#;

    let grammar = StructuralGrammar::from_json(json).unwrap();
    assert!(grammar.is_referenced("double_string"));
    assert!(grammar.is_referenced("macro"));
    assert!(!grammar.has_rule("macro"));
    // Field names are not symbols.
    assert!(!grammar.is_referenced("body"));

    let undeclared: Vec<_> = grammar.undeclared_references().collect();
    assert_eq!(undeclared, ["macro", "compound_string"]);
}

#[test]
fn invalid_json_is_an_error() {
    let err = StructuralGrammar::from_json("{ \"rules\": [").unwrap_err();
    assert!(err.to_string().starts_with("JSON parse error"));
}

#[test]
fn rules_must_be_an_object() {
    assert!(StructuralGrammar::from_json(r#"{ "name": "x", "rules": [] }"#).is_err());
}

#[test]
fn array_root_is_not_a_grammar() {
    let positional = r#"["stata", { "source_file": { "type": "BLANK" } }]"#;
    let err = StructuralGrammar::from_json(positional).unwrap_err();
    assert!(err.to_string().contains("expected a JSON object"), "{err}");
}
