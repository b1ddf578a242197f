use std::fmt::Write;
use std::path::PathBuf;

use parity_core::colors::Colors;
use parity_core::utils::line_of;
use parity_lib::{ArtifactRole, HighlightQueries};
use serde::Serialize;

use super::run_common::{
    ArtifactArgs, EXIT_FAILED, fatal, print_diagnostics, print_json, read_artifact,
};
use crate::cli::OutputFormat;

pub struct CapturesArgs {
    pub artifacts: ArtifactArgs,
    pub file: Option<PathBuf>,
    pub node: Option<String>,
    pub format: OutputFormat,
    pub color: bool,
}

/// A capture pair with its 1-based line.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CaptureRow<'a> {
    pub line: usize,
    pub node: &'a str,
    pub named: bool,
    pub capture: &'a str,
}

pub fn run(args: CapturesArgs) {
    let (path, source) =
        read_artifact(args.file.as_deref(), &args.artifacts, ArtifactRole::Highlights)
            .unwrap_or_else(|e| fatal(&e));
    let queries = HighlightQueries::parse(source);
    print_diagnostics(queries.diagnostics(), queries.source(), &path, args.color);

    let rows = capture_rows(&queries, args.node.as_deref());
    match args.format {
        OutputFormat::Text => print!("{}", render_captures(&rows, Colors::new(args.color))),
        OutputFormat::Json => print_json(&rows),
    }

    if queries.diagnostics().has_errors() {
        std::process::exit(EXIT_FAILED);
    }
}

pub fn capture_rows<'a>(queries: &'a HighlightQueries, node: Option<&str>) -> Vec<CaptureRow<'a>> {
    queries
        .captures()
        .filter(|pair| node.is_none_or(|node| pair.node_type == node))
        .map(|pair| CaptureRow {
            line: line_of(queries.source(), pair.range.start().into()),
            node: &pair.node_type,
            named: pair.named,
            capture: &pair.capture,
        })
        .collect()
}

pub fn render_captures(rows: &[CaptureRow<'_>], c: Colors) -> String {
    let mut out = String::new();
    for row in rows {
        let node = if row.named {
            format!("({})", row.node)
        } else {
            format!("{:?}", row.node)
        };
        writeln!(
            out,
            "{}{:>4}{}  {node} {}@{}{}",
            c.dim, row.line, c.reset, c.blue, row.capture, c.reset
        )
        .expect("String write never fails");
    }
    out
}
