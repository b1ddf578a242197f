use std::fmt::Write;

use parity_core::utils::suggest;
use parity_lib::{Artifacts, Category, Session};

use super::run_common::{
    ArtifactArgs, EXIT_FAILED, fatal, load_config, print_diagnostics, print_json,
};
use crate::cli::OutputFormat;

pub struct CheckArgs {
    pub artifacts: ArtifactArgs,
    pub categories: Vec<String>,
    pub format: OutputFormat,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let config = load_config(&args.artifacts).unwrap_or_else(|e| fatal(&e));
    let categories =
        select_categories(&config.categories, &args.categories).unwrap_or_else(|msg| fatal(&msg));
    let artifacts = Artifacts::load(&config.artifacts.resolve()).unwrap_or_else(|e| fatal(&e));

    for (role, diagnostics) in artifacts.diagnostics() {
        print_diagnostics(
            diagnostics,
            artifacts.source(role),
            artifacts.paths.get(role),
            args.color,
        );
    }

    let report = Session::new(&artifacts).run(&categories);
    match args.format {
        OutputFormat::Text => println!("{}", report.render_text(args.color)),
        OutputFormat::Json => print_json(&report),
    }

    let failed = !report.is_success() || (args.strict && artifacts.has_diagnostics());
    if failed {
        std::process::exit(EXIT_FAILED);
    }
}

/// Categories named with `--category`, in configuration order. All of them
/// when none is named.
pub fn select_categories(categories: &[Category], names: &[String]) -> Result<Vec<Category>, String> {
    if let Some(unknown) = names
        .iter()
        .find(|name| !categories.iter().any(|c| &c.name == *name))
    {
        let mut msg = format!("unknown category `{unknown}`");
        if let Some(close) = suggest(unknown, categories.iter().map(|c| c.name.as_str())) {
            write!(msg, "; did you mean `{close}`?").expect("String write never fails");
        }
        return Err(msg);
    }
    Ok(categories
        .iter()
        .filter(|c| names.is_empty() || names.contains(&c.name))
        .cloned()
        .collect())
}
