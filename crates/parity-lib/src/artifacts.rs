//! Loading the three artifacts of a parity session.
//!
//! Every location is read before anything is parsed, so a missing file is
//! reported as such even when another artifact is also malformed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use parity_core::{ScopeGrammar, StructuralGrammar};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, Severity};
use crate::query::HighlightQueries;
use crate::{Error, Result, grammar_js};

/// Which input an artifact plays in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactRole {
    Grammar,
    Highlights,
    Reference,
}

impl ArtifactRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactRole::Grammar => "grammar",
            ArtifactRole::Highlights => "highlights",
            ArtifactRole::Reference => "reference",
        }
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactRole::Grammar => "structural grammar",
            ArtifactRole::Highlights => "highlight queries",
            ArtifactRole::Reference => "reference grammar",
        };
        f.write_str(label)
    }
}

/// Locations of the three artifacts. Relative paths are taken from `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    pub grammar: PathBuf,
    pub highlights: PathBuf,
    pub reference: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl ArtifactPaths {
    pub fn new(
        root: impl Into<PathBuf>,
        grammar: impl Into<PathBuf>,
        highlights: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            grammar: grammar.into(),
            highlights: highlights.into(),
            reference: reference.into(),
        }
    }

    /// Joins relative artifact paths onto `root`. Absolute paths are kept.
    pub fn resolve(&self) -> Self {
        Self {
            root: self.root.clone(),
            grammar: self.root.join(&self.grammar),
            highlights: self.root.join(&self.highlights),
            reference: self.root.join(&self.reference),
        }
    }

    pub fn get(&self, role: ArtifactRole) -> &Path {
        match role {
            ArtifactRole::Grammar => &self.grammar,
            ArtifactRole::Highlights => &self.highlights,
            ArtifactRole::Reference => &self.reference,
        }
    }
}

/// The structural grammar with the source it was read from.
#[derive(Debug, Clone)]
pub struct GrammarDocument {
    pub source: String,
    pub grammar: StructuralGrammar,
    /// Scanner warnings; always empty for `grammar.json`.
    pub diagnostics: Diagnostics,
}

impl GrammarDocument {
    /// Reads `grammar.json` when `path` has a `.json` extension, `grammar.js` otherwise.
    pub fn parse(path: &Path, source: String) -> Result<Self> {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json {
            let grammar = StructuralGrammar::from_json(&source).map_err(|source| {
                Error::MalformedGrammar {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            return Ok(Self {
                source,
                grammar,
                diagnostics: Diagnostics::new(),
            });
        }
        let scan = grammar_js::scan(&source);
        Ok(Self {
            source,
            grammar: scan.grammar,
            diagnostics: scan.diagnostics,
        })
    }
}

/// One immutable snapshot of the three documents.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub paths: ArtifactPaths,
    pub grammar: GrammarDocument,
    pub highlights: HighlightQueries,
    pub reference: ScopeGrammar,
    pub reference_source: String,
}

impl Artifacts {
    /// Reads and parses all three artifacts from already resolved `paths`.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let grammar_source = read(paths, ArtifactRole::Grammar)?;
        let highlights_source = read(paths, ArtifactRole::Highlights)?;
        let reference_source = read(paths, ArtifactRole::Reference)?;

        let reference = ScopeGrammar::from_json(&reference_source).map_err(|source| {
            Error::MalformedReference {
                path: paths.reference.clone(),
                source,
            }
        })?;
        tracing::debug!(
            path = %paths.reference.display(),
            declarations = reference.declarations().len(),
            "loaded reference grammar"
        );

        let grammar = GrammarDocument::parse(&paths.grammar, grammar_source)?;
        tracing::debug!(
            path = %paths.grammar.display(),
            rules = grammar.grammar.rule_count(),
            warnings = grammar.diagnostics.count(Severity::Warning),
            "loaded structural grammar"
        );

        let highlights = HighlightQueries::parse(highlights_source);
        tracing::debug!(
            path = %paths.highlights.display(),
            patterns = highlights.patterns().len(),
            errors = highlights.diagnostics().count(Severity::Error),
            "loaded highlight queries"
        );

        Ok(Self {
            paths: paths.clone(),
            grammar,
            highlights,
            reference,
            reference_source,
        })
    }

    /// Builds a snapshot from in-memory sources. The grammar is read as
    /// `grammar.js`.
    pub fn from_sources(grammar: &str, highlights: &str, reference: &str) -> Result<Self> {
        let paths = ArtifactPaths::new(".", "grammar.js", "queries/highlights.scm", "reference.json");
        let reference_grammar =
            ScopeGrammar::from_json(reference).map_err(|source| Error::MalformedReference {
                path: paths.reference.clone(),
                source,
            })?;
        Ok(Self {
            grammar: GrammarDocument::parse(&paths.grammar, grammar.to_string())?,
            highlights: HighlightQueries::parse(highlights),
            reference: reference_grammar,
            reference_source: reference.to_string(),
            paths,
        })
    }

    /// Raw text of one artifact.
    pub fn source(&self, role: ArtifactRole) -> &str {
        match role {
            ArtifactRole::Grammar => &self.grammar.source,
            ArtifactRole::Highlights => self.highlights.source(),
            ArtifactRole::Reference => &self.reference_source,
        }
    }

    /// Diagnostics collected while reading the artifacts, per role.
    pub fn diagnostics(&self) -> [(ArtifactRole, &Diagnostics); 2] {
        [
            (ArtifactRole::Grammar, &self.grammar.diagnostics),
            (ArtifactRole::Highlights, self.highlights.diagnostics()),
        ]
    }

    /// Whether reading any artifact produced a diagnostic of any severity.
    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics().iter().any(|(_, d)| !d.is_empty())
    }
}

fn read(paths: &ArtifactPaths, role: ArtifactRole) -> Result<String> {
    let path = paths.get(role);
    fs::read_to_string(path).map_err(|source| Error::MissingArtifact {
        role,
        path: path.to_path_buf(),
        source,
    })
}
