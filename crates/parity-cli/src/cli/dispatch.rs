//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror the command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the fields each command uses
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::{ColorChoice, OutputFormat};
use crate::commands::captures::CapturesArgs;
use crate::commands::check::CheckArgs;
use crate::commands::run_common::ArtifactArgs;
use crate::commands::rules::RulesArgs;
use crate::commands::scopes::ScopesArgs;

/// Configuration and artifact location flags shared by every command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArtifactParams {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub grammar: Option<PathBuf>,
    pub highlights: Option<PathBuf>,
    pub reference: Option<PathBuf>,
}

impl ArtifactParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config: m.get_one::<PathBuf>("config").cloned(),
            root: m.get_one::<PathBuf>("root").cloned(),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
            highlights: m.get_one::<PathBuf>("highlights").cloned(),
            reference: m.get_one::<PathBuf>("reference").cloned(),
        }
    }
}

impl From<ArtifactParams> for ArtifactArgs {
    fn from(p: ArtifactParams) -> Self {
        Self {
            config: p.config,
            root: p.root,
            grammar: p.grammar,
            highlights: p.highlights,
            reference: p.reference,
        }
    }
}

pub struct CheckParams {
    pub artifacts: ArtifactParams,
    pub categories: Vec<String>,
    pub format: OutputFormat,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            artifacts: ArtifactParams::from_matches(m),
            categories: m
                .get_many::<String>("category")
                .map(|names| names.cloned().collect())
                .unwrap_or_default(),
            format: parse_format(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            artifacts: p.artifacts.into(),
            categories: p.categories,
            format: p.format,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RulesParams {
    pub artifacts: ArtifactParams,
    pub file: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl RulesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            artifacts: ArtifactParams::from_matches(m),
            file: m.get_one::<PathBuf>("file").cloned(),
            format: parse_format(m),
            color: parse_color(m),
        }
    }
}

impl From<RulesParams> for RulesArgs {
    fn from(p: RulesParams) -> Self {
        Self {
            artifacts: p.artifacts.into(),
            file: p.file,
            format: p.format,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ScopesParams {
    pub artifacts: ArtifactParams,
    pub file: Option<PathBuf>,
    pub prefix: Option<String>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl ScopesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            artifacts: ArtifactParams::from_matches(m),
            file: m.get_one::<PathBuf>("file").cloned(),
            prefix: m.get_one::<String>("prefix").cloned(),
            format: parse_format(m),
            color: parse_color(m),
        }
    }
}

impl From<ScopesParams> for ScopesArgs {
    fn from(p: ScopesParams) -> Self {
        Self {
            artifacts: p.artifacts.into(),
            file: p.file,
            prefix: p.prefix,
            format: p.format,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CapturesParams {
    pub artifacts: ArtifactParams,
    pub file: Option<PathBuf>,
    pub node: Option<String>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl CapturesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            artifacts: ArtifactParams::from_matches(m),
            file: m.get_one::<PathBuf>("file").cloned(),
            node: m.get_one::<String>("node").cloned(),
            format: parse_format(m),
            color: parse_color(m),
        }
    }
}

impl From<CapturesParams> for CapturesArgs {
    fn from(p: CapturesParams) -> Self {
        Self {
            artifacts: p.artifacts.into(),
            file: p.file,
            node: p.node,
            format: p.format,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Parse --format flag into OutputFormat.
fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}
