//! Parity checks between a tree-sitter grammar, its highlight queries and a
//! TextMate reference grammar.
//!
//! # Example
//!
//! ```no_run
//! use parity_lib::{Artifacts, Session, config};
//!
//! let config = config::Loader::new().build()?;
//! let artifacts = Artifacts::load(&config.artifacts.resolve())?;
//! let report = Session::new(&artifacts).run(&config.categories);
//! println!("{}", report.render_text(false));
//! # Ok::<(), parity_lib::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod artifacts;
pub mod config;
pub mod diagnostics;
pub mod grammar_js;
pub mod predicates;
pub mod query;
pub mod session;

#[cfg(test)]
mod predicates_tests;

use std::path::PathBuf;

pub use artifacts::{ArtifactPaths, ArtifactRole, Artifacts, GrammarDocument};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use query::HighlightQueries;
pub use session::{Category, Check, Outcome, Report, Session};

/// Fatal errors. A failed parity check is never one of these: it is an
/// [`Outcome`] in the [`Report`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input location could not be read. Raised before any check runs.
    #[error("cannot read {role} `{}`: {source}", .path.display())]
    MissingArtifact {
        role: ArtifactRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reference document is not a TextMate grammar.
    #[error("malformed reference grammar `{}`: {source}", .path.display())]
    MalformedReference {
        path: PathBuf,
        #[source]
        source: parity_core::ScopeGrammarError,
    },

    /// A `grammar.json` structural grammar is not valid JSON.
    #[error("malformed grammar `{}`: {source}", .path.display())]
    MalformedGrammar {
        path: PathBuf,
        #[source]
        source: parity_core::GrammarError,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Result type for loading and configuration.
pub type Result<T> = std::result::Result<T, Error>;
