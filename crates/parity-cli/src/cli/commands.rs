//! Command builders for the CLI.
//!
//! Every command accepts the artifact location flags, so a listing command
//! can read the same file a session would.

use clap::Command;

use super::args::*;

/// Add configuration and artifact location args.
fn with_artifact_args(cmd: Command) -> Command {
    cmd.arg(config_arg())
        .arg(root_arg())
        .arg(grammar_arg())
        .arg(highlights_arg())
        .arg(reference_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("grammar-parity")
        .about("Check a tree-sitter grammar and its highlight queries against a TextMate grammar")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(rules_command())
        .subcommand(scopes_command())
        .subcommand(captures_command())
}

/// Run a parity session.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Run parity checks over the three artifacts")
        .after_help(
            r#"EXIT STATUS:
  0  every expectation holds
  1  some expectation failed (or --strict and an artifact has diagnostics)
  2  an artifact or the configuration could not be loaded

EXAMPLES:
  grammar-parity check                          # defaults + ./parity.toml
  grammar-parity check --root tree-sitter-stata
  grammar-parity check --reference stata.tmLanguage.json --category strings
  grammar-parity check --format json"#,
        )
        .arg(category_arg())
        .arg(format_arg())
        .arg(strict_arg())
        .arg(color_arg());

    with_artifact_args(cmd)
}

/// List rule declarations of a structural grammar.
pub fn rules_command() -> Command {
    let cmd = Command::new("rules")
        .about("List declared rules and undeclared references")
        .after_help(
            r#"EXAMPLES:
  grammar-parity rules grammar.js
  grammar-parity rules src/grammar.json --format json
  grammar-parity rules --root tree-sitter-stata   # configured grammar"#,
        )
        .arg(file_arg("Structural grammar (default: configured grammar)"))
        .arg(format_arg())
        .arg(color_arg());

    with_artifact_args(cmd)
}

/// List scope declarations of a TextMate grammar.
pub fn scopes_command() -> Command {
    let cmd = Command::new("scopes")
        .about("List scope declarations of the reference grammar")
        .after_help(
            r#"EXAMPLES:
  grammar-parity scopes stata.tmLanguage.json
  grammar-parity scopes stata.tmLanguage.json --prefix keyword"#,
        )
        .arg(file_arg("Reference grammar (default: configured reference)"))
        .arg(prefix_arg())
        .arg(format_arg())
        .arg(color_arg());

    with_artifact_args(cmd)
}

/// List capture pairs of highlight queries.
pub fn captures_command() -> Command {
    let cmd = Command::new("captures")
        .about("List (node) @capture pairs of the highlight queries")
        .after_help(
            r#"EXAMPLES:
  grammar-parity captures queries/highlights.scm
  grammar-parity captures queries/highlights.scm --node identifier"#,
        )
        .arg(file_arg("Highlight queries (default: configured highlights)"))
        .arg(node_arg())
        .arg(format_arg())
        .arg(color_arg());

    with_artifact_args(cmd)
}
