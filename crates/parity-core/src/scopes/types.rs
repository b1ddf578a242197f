//! Scope declaration types.

use serde::Serialize;

/// Which reserved key declared a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKey {
    /// `name` on a rule or capture.
    Name,
    /// `contentName` on a begin/end rule.
    ContentName,
    /// Top-level `scopeName`.
    ScopeName,
}

impl ScopeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKey::Name => "name",
            ScopeKey::ContentName => "contentName",
            ScopeKey::ScopeName => "scopeName",
        }
    }
}

/// One scope-declaring value found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeDecl {
    /// The declared value, verbatim. May hold several space-separated scopes.
    pub value: String,
    pub key: ScopeKey,
    /// Dotted location, e.g. `repository.keywords.patterns[0]`.
    pub path: String,
}

impl ScopeDecl {
    /// Individual scope names in this declaration.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.value.split_whitespace()
    }

    pub fn declares(&self, scope: &str) -> bool {
        self.scopes().any(|s| s == scope)
    }

    /// Whether any of its scopes lies under a dotted prefix.
    pub fn is_under(&self, prefix: &str) -> bool {
        self.scopes().any(|s| is_under(s, prefix))
    }
}

/// Whether `scope` equals `prefix` or extends it by whole segments.
///
/// `keyword.other` covers `keyword.other` and `keyword.other.stata`, not
/// `keyword.otherwise`.
pub fn is_under(scope: &str, prefix: &str) -> bool {
    scope
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// All scope declarations of a TextMate grammar, in document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScopeGrammar {
    /// Display name (e.g., "Stata"). Not a scope.
    pub name: Option<String>,
    /// Root scope (e.g., "source.stata").
    pub scope_name: Option<String>,
    declarations: Vec<ScopeDecl>,
}

impl ScopeGrammar {
    pub fn new(name: Option<String>, scope_name: Option<String>) -> Self {
        Self {
            name,
            scope_name,
            declarations: Vec::new(),
        }
    }

    pub fn push(&mut self, decl: ScopeDecl) {
        self.declarations.push(decl);
    }

    pub fn declarations(&self) -> &[ScopeDecl] {
        &self.declarations
    }

    /// Exact presence of a single scope name.
    ///
    /// `keyword.other` does not match a declaration of `keyword.other.special`.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.find(scope).next().is_some()
    }

    /// Declarations of `scope`, for locating it in the document.
    pub fn find(&self, scope: &str) -> impl Iterator<Item = &ScopeDecl> {
        self.declarations.iter().filter(move |d| d.declares(scope))
    }

    /// Distinct scope names in first-declaration order.
    pub fn scopes(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for decl in &self.declarations {
            for scope in decl.scopes() {
                seen.insert(scope);
            }
        }
        seen.into_iter().collect()
    }

    /// Distinct scopes under a dotted prefix, see [`is_under`].
    pub fn scopes_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.scopes()
            .into_iter()
            .filter(|scope| is_under(scope, prefix))
            .collect()
    }
}
