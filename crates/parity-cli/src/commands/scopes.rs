use std::fmt::Write;
use std::path::PathBuf;

use parity_core::colors::Colors;
use parity_core::{ScopeDecl, ScopeGrammar};
use parity_lib::{ArtifactRole, Error};

use super::run_common::{ArtifactArgs, fatal, print_json, read_artifact};
use crate::cli::OutputFormat;

pub struct ScopesArgs {
    pub artifacts: ArtifactArgs,
    pub file: Option<PathBuf>,
    pub prefix: Option<String>,
    pub format: OutputFormat,
    pub color: bool,
}

pub fn run(args: ScopesArgs) {
    let (path, source) =
        read_artifact(args.file.as_deref(), &args.artifacts, ArtifactRole::Reference)
            .unwrap_or_else(|e| fatal(&e));
    let reference = ScopeGrammar::from_json(&source).unwrap_or_else(|source| {
        fatal(&Error::MalformedReference {
            path: path.clone(),
            source,
        })
    });

    let decls = select_scopes(&reference, args.prefix.as_deref());
    match args.format {
        OutputFormat::Text => print!("{}", render_scopes(&decls, Colors::new(args.color))),
        OutputFormat::Json => print_json(&decls),
    }
}

/// Declarations in document order, optionally restricted to a dotted prefix.
pub fn select_scopes<'a>(reference: &'a ScopeGrammar, prefix: Option<&str>) -> Vec<&'a ScopeDecl> {
    reference
        .declarations()
        .iter()
        .filter(|decl| prefix.is_none_or(|prefix| decl.is_under(prefix)))
        .collect()
}

/// One declaration per line, its document path aligned after the value.
pub fn render_scopes(decls: &[&ScopeDecl], c: Colors) -> String {
    let width = decls.iter().map(|d| d.value.len()).max().unwrap_or(0);
    let mut out = String::new();
    for decl in decls {
        writeln!(
            out,
            "{:<width$}  {}{}{}",
            decl.value, c.dim, decl.path, c.reset
        )
        .expect("String write never fails");
    }
    out
}
