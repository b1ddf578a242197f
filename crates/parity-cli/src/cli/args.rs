//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be composed
//! into several commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Explicit configuration file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Configuration file (default: parity.toml in the root, if present)")
}

/// Directory the artifact paths are relative to (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory artifact paths are relative to")
}

/// Structural grammar override (--grammar).
pub fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Structural grammar (grammar.js or grammar.json)")
}

/// Highlight queries override (--highlights).
pub fn highlights_arg() -> Arg {
    Arg::new("highlights")
        .long("highlights")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Highlight queries (highlights.scm)")
}

/// Reference grammar override (--reference).
pub fn reference_arg() -> Arg {
    Arg::new("reference")
        .long("reference")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("TextMate reference grammar (*.tmLanguage.json)")
}

/// Artifact file to inspect (positional).
pub fn file_arg(help: &'static str) -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

/// Restrict a session to named categories (--category, repeatable).
pub fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Only run this category (repeatable)")
}

/// Scope prefix filter (--prefix).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .long("prefix")
        .value_name("SCOPE")
        .help("Only list scopes under this dotted prefix")
}

/// Node type filter (--node).
pub fn node_arg() -> Arg {
    Arg::new("node")
        .long("node")
        .value_name("TYPE")
        .help("Only list captures on this node type")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format")
}

/// Treat diagnostics as failures (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Fail when any artifact produced diagnostics")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log verbosity (-v info, -vv debug, -vvv trace)")
}
