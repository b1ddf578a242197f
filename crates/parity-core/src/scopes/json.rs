//! JSON deserialization for TextMate grammars.
//!
//! The raw layer mirrors the nesting of `*.tmLanguage.json`: rules hold
//! `patterns`, `repository` entries and capture maps, each of which are rules
//! again. Unknown keys (`match`, `begin`, `comment`, ...) are ignored; known
//! keys with the wrong shape are errors, and so is a rule that is not an object.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{ScopeDecl, ScopeGrammar, ScopeKey};
use crate::json::Object;

/// Error during reference grammar parsing.
#[derive(Debug)]
pub enum ScopeGrammarError {
    Json(serde_json::Error),
}

impl std::fmt::Display for ScopeGrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ScopeGrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
        }
    }
}

impl ScopeGrammar {
    /// Parse and flatten a TextMate grammar from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScopeGrammarError> {
        let raw: Object<RawTmGrammar> =
            serde_json::from_str(json).map_err(ScopeGrammarError::Json)?;
        Ok(raw.into_inner().into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTmGrammar {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scope_name: Option<String>,
    #[serde(default)]
    patterns: Vec<Object<RawTmRule>>,
    #[serde(default)]
    repository: IndexMap<String, Object<RawTmRule>>,
    #[serde(default)]
    injections: IndexMap<String, Object<RawTmRule>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTmRule {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content_name: Option<String>,
    #[serde(default)]
    patterns: Vec<Object<RawTmRule>>,
    #[serde(default)]
    repository: IndexMap<String, Object<RawTmRule>>,
    #[serde(default)]
    captures: IndexMap<String, Object<RawTmRule>>,
    #[serde(default)]
    begin_captures: IndexMap<String, Object<RawTmRule>>,
    #[serde(default)]
    end_captures: IndexMap<String, Object<RawTmRule>>,
    #[serde(default)]
    while_captures: IndexMap<String, Object<RawTmRule>>,
}

impl From<RawTmGrammar> for ScopeGrammar {
    fn from(raw: RawTmGrammar) -> Self {
        let mut grammar = ScopeGrammar::new(raw.name, raw.scope_name.clone());
        if let Some(scope_name) = raw.scope_name {
            grammar.push(ScopeDecl {
                value: scope_name,
                key: ScopeKey::ScopeName,
                path: "scopeName".to_string(),
            });
        }

        let mut flattener = Flattener {
            grammar: &mut grammar,
        };
        flattener.rules("patterns", &raw.patterns);
        flattener.map("repository", &raw.repository);
        flattener.map("injections", &raw.injections);
        grammar
    }
}

/// Depth-first walk collecting scope declarations with their paths.
struct Flattener<'g> {
    grammar: &'g mut ScopeGrammar,
}

impl Flattener<'_> {
    fn rules(&mut self, path: &str, rules: &[Object<RawTmRule>]) {
        for (i, rule) in rules.iter().enumerate() {
            self.rule(&format!("{path}[{i}]"), rule);
        }
    }

    fn map(&mut self, path: &str, rules: &IndexMap<String, Object<RawTmRule>>) {
        for (key, rule) in rules {
            self.rule(&format!("{path}.{key}"), rule);
        }
    }

    fn rule(&mut self, path: &str, rule: &RawTmRule) {
        if let Some(name) = &rule.name {
            self.declare(path, ScopeKey::Name, name);
        }
        if let Some(content_name) = &rule.content_name {
            self.declare(path, ScopeKey::ContentName, content_name);
        }
        self.map(&format!("{path}.captures"), &rule.captures);
        self.map(&format!("{path}.beginCaptures"), &rule.begin_captures);
        self.map(&format!("{path}.endCaptures"), &rule.end_captures);
        self.map(&format!("{path}.whileCaptures"), &rule.while_captures);
        self.rules(&format!("{path}.patterns"), &rule.patterns);
        self.map(&format!("{path}.repository"), &rule.repository);
    }

    fn declare(&mut self, path: &str, key: ScopeKey, value: &str) {
        self.grammar.push(ScopeDecl {
            value: value.to_string(),
            key,
            path: path.to_string(),
        });
    }
}
