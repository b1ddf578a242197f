//! Structural grammar type definitions.

use std::ops::Range;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A rule declaration: a top-level key of the grammar's `rules` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDecl {
    pub name: String,
    /// Byte range of the declaring key in the source, when known.
    /// `grammar.json` carries no positions.
    pub span: Option<Range<usize>>,
}

impl RuleDecl {
    pub fn new(name: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Rule declarations and references of a tree-sitter grammar.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuralGrammar {
    /// Grammar name (e.g., "stata").
    pub name: Option<String>,
    /// Declarations in definition order. The entry rule is first.
    rules: IndexMap<String, RuleDecl>,
    /// Rule names used as `$.name` (or `SYMBOL`) anywhere in the grammar.
    references: IndexSet<String>,
}

impl StructuralGrammar {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Record a declaration. Returns the previous declaration of the same name;
    /// the new one replaces it, as later keys do in an object literal.
    pub fn declare(&mut self, decl: RuleDecl) -> Option<RuleDecl> {
        let (_, previous) = self.rules.insert_full(decl.name.clone(), decl);
        previous
    }

    pub fn reference(&mut self, name: impl Into<String>) {
        self.references.insert(name.into());
    }

    /// Whether `name` is declared as a rule. References alone do not count.
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn rule(&self, name: &str) -> Option<&RuleDecl> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleDecl> {
        self.rules.values()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.references.contains(name)
    }

    /// Names referenced somewhere but never declared, in first-use order.
    ///
    /// Usually external scanner tokens or typos.
    pub fn undeclared_references(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .map(String::as_str)
            .filter(|name| !self.rules.contains_key(*name))
    }
}
