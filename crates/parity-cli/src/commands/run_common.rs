//! Configuration and artifact loading shared by all commands.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use parity_lib::config::{Loader, PROJECT_FILE, ParityConfig};
use parity_lib::{ArtifactRole, Diagnostics, Error};
use serde::Serialize;

/// Exit status when an expectation failed.
pub const EXIT_FAILED: i32 = 1;
/// Exit status when an artifact or the configuration cannot be loaded.
pub const EXIT_FATAL: i32 = 2;

/// Configuration and artifact location flags.
#[derive(Debug, Default, Clone)]
pub struct ArtifactArgs {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub grammar: Option<PathBuf>,
    pub highlights: Option<PathBuf>,
    pub reference: Option<PathBuf>,
}

/// Layers defaults, the project file and command-line overrides.
///
/// Without `--config`, `parity.toml` in the root directory is used when it
/// exists.
pub fn load_config(args: &ArtifactArgs) -> Result<ParityConfig, Error> {
    let loader = match &args.config {
        Some(path) => Loader::new().with_file(path),
        None => {
            let root = args.root.as_deref().unwrap_or(Path::new("."));
            Loader::new().with_optional_file(root.join(PROJECT_FILE))
        }
    };
    let config = loader
        .set_override_option("artifacts.root", path_value(args.root.as_deref()))?
        .set_override_option("artifacts.grammar", path_value(args.grammar.as_deref()))?
        .set_override_option("artifacts.highlights", path_value(args.highlights.as_deref()))?
        .set_override_option("artifacts.reference", path_value(args.reference.as_deref()))?
        .build()?;
    tracing::debug!(
        root = %config.artifacts.root.display(),
        categories = config.categories.len(),
        "loaded configuration"
    );
    Ok(config)
}

fn path_value(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

/// Reads one artifact: `file` when given, the configured location otherwise.
pub fn read_artifact(
    file: Option<&Path>,
    args: &ArtifactArgs,
    role: ArtifactRole,
) -> Result<(PathBuf, String), Error> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => load_config(args)?.artifacts.resolve().get(role).to_path_buf(),
    };
    match fs::read_to_string(&path) {
        Ok(source) => Ok((path, source)),
        Err(source) => Err(Error::MissingArtifact { role, path, source }),
    }
}

/// Prints a fatal error and exits with [`EXIT_FATAL`].
pub fn fatal(err: &dyn Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(EXIT_FATAL);
}

/// Renders diagnostics of one artifact to stderr.
pub fn print_diagnostics(diagnostics: &Diagnostics, source: &str, path: &Path, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    let path = path.to_string_lossy();
    eprint!(
        "{}",
        diagnostics
            .printer()
            .source(source)
            .path(&path)
            .colored(color)
            .render()
    );
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fatal(&e),
    }
}
