use std::fmt::Write;
use std::path::PathBuf;

use parity_core::StructuralGrammar;
use parity_core::colors::Colors;
use parity_lib::{ArtifactRole, GrammarDocument};
use serde::Serialize;

use super::run_common::{ArtifactArgs, fatal, print_diagnostics, print_json, read_artifact};
use crate::cli::OutputFormat;

pub struct RulesArgs {
    pub artifacts: ArtifactArgs,
    pub file: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Debug, Serialize)]
pub struct RulesListing<'a> {
    pub name: Option<&'a str>,
    pub rules: Vec<&'a str>,
    pub undeclared: Vec<&'a str>,
}

impl<'a> RulesListing<'a> {
    pub fn new(grammar: &'a StructuralGrammar) -> Self {
        Self {
            name: grammar.name.as_deref(),
            rules: grammar.rule_names().collect(),
            undeclared: grammar.undeclared_references().collect(),
        }
    }

    pub fn render(&self, c: Colors) -> String {
        let mut out = String::new();
        let name = self.name.unwrap_or("grammar");
        writeln!(out, "{}{name}{}: {} rules", c.blue, c.reset, self.rules.len())
            .expect("String write never fails");
        for rule in &self.rules {
            writeln!(out, "  {rule}").expect("String write never fails");
        }
        if !self.undeclared.is_empty() {
            writeln!(out, "{}referenced but not declared:{}", c.dim, c.reset)
                .expect("String write never fails");
            for name in &self.undeclared {
                writeln!(out, "  {name}").expect("String write never fails");
            }
        }
        out
    }
}

pub fn run(args: RulesArgs) {
    let (path, source) = read_artifact(args.file.as_deref(), &args.artifacts, ArtifactRole::Grammar)
        .unwrap_or_else(|e| fatal(&e));
    let document = GrammarDocument::parse(&path, source).unwrap_or_else(|e| fatal(&e));
    print_diagnostics(&document.diagnostics, &document.source, &path, args.color);

    let listing = RulesListing::new(&document.grammar);
    match args.format {
        OutputFormat::Text => print!("{}", listing.render(Colors::new(args.color))),
        OutputFormat::Json => print_json(&listing),
    }
}
