//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Artifact flags are accepted by every command
//! 2. Params extraction: correct fields are extracted from ArgMatches
//! 3. Value validation for --format and --color

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{captures_command, check_command, rules_command, scopes_command};

#[test]
fn check_defaults() {
    let m = check_command().try_get_matches_from(["check"]).unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.artifacts, dispatch::ArtifactParams::default());
    assert!(params.categories.is_empty());
    assert_eq!(params.format, OutputFormat::Text);
    assert!(!params.strict);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_extracts_artifact_overrides() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "--config",
            "ci/parity.toml",
            "--root",
            "tree-sitter-stata",
            "--grammar",
            "src/grammar.json",
            "--highlights",
            "queries/highlights.scm",
            "--reference",
            "../sight/stata.tmLanguage.json",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.artifacts.config, Some(PathBuf::from("ci/parity.toml")));
    assert_eq!(params.artifacts.root, Some(PathBuf::from("tree-sitter-stata")));
    assert_eq!(params.artifacts.grammar, Some(PathBuf::from("src/grammar.json")));
    assert_eq!(
        params.artifacts.highlights,
        Some(PathBuf::from("queries/highlights.scm"))
    );
    assert_eq!(
        params.artifacts.reference,
        Some(PathBuf::from("../sight/stata.tmLanguage.json"))
    );
}

#[test]
fn check_collects_repeated_categories() {
    let m = check_command()
        .try_get_matches_from(["check", "--category", "keywords", "--category", "strings"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.categories, ["keywords", "strings"]);
}

#[test]
fn check_output_flags() {
    let m = check_command()
        .try_get_matches_from(["check", "--format", "json", "--strict", "--color", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.format, OutputFormat::Json);
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Never);

    let args: crate::commands::check::CheckArgs = params.into();
    assert!(!args.color);
}

#[test]
fn check_rejects_unknown_format() {
    let result = check_command().try_get_matches_from(["check", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn check_rejects_unknown_color() {
    let result = check_command().try_get_matches_from(["check", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn rules_positional_file() {
    let m = rules_command()
        .try_get_matches_from(["rules", "grammar.js", "--format", "json"])
        .unwrap();
    let params = RulesParams::from_matches(&m);
    assert_eq!(params.file, Some(PathBuf::from("grammar.js")));
    assert_eq!(params.format, OutputFormat::Json);
}

#[test]
fn rules_file_is_optional() {
    let m = rules_command()
        .try_get_matches_from(["rules", "--root", "tree-sitter-stata"])
        .unwrap();
    let params = RulesParams::from_matches(&m);
    assert_eq!(params.file, None);
    assert_eq!(params.artifacts.root, Some(PathBuf::from("tree-sitter-stata")));
}

#[test]
fn scopes_prefix() {
    let m = scopes_command()
        .try_get_matches_from(["scopes", "stata.tmLanguage.json", "--prefix", "keyword"])
        .unwrap();
    let params = ScopesParams::from_matches(&m);
    assert_eq!(params.file, Some(PathBuf::from("stata.tmLanguage.json")));
    assert_eq!(params.prefix.as_deref(), Some("keyword"));
}

#[test]
fn captures_node_filter() {
    let m = captures_command()
        .try_get_matches_from(["captures", "highlights.scm", "--node", "identifier", "--color", "always"])
        .unwrap();
    let params = CapturesParams::from_matches(&m);
    assert_eq!(params.file, Some(PathBuf::from("highlights.scm")));
    assert_eq!(params.node.as_deref(), Some("identifier"));
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn captures_rejects_check_flags() {
    let result = captures_command().try_get_matches_from(["captures", "--category", "strings"]);
    assert!(result.is_err());
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["grammar-parity", "check", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);
}

#[test]
fn subcommand_is_required() {
    let result = build_cli().try_get_matches_from(["grammar-parity"]);
    assert!(result.is_err());
}
