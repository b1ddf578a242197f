//! Declaration extraction from tree-sitter's generated `grammar.json`.
//!
//! Rule bodies are kept as untyped JSON and only walked for `SYMBOL` nodes,
//! which are the references.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::types::{RuleDecl, StructuralGrammar};
use crate::json::Object;

/// Error during grammar parsing.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
        }
    }
}

impl StructuralGrammar {
    /// Parse declarations and references from `grammar.json` content.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: Object<RawGrammar> = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Ok(raw.into_inner().into())
    }
}

/// The subset of tree-sitter's JSON format parity checks read.
#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: Option<String>,
    // IndexMap preserves definition order; the entry rule is first.
    rules: IndexMap<String, Value>,
    #[serde(default)]
    extras: Vec<Value>,
    #[serde(default)]
    externals: Vec<Value>,
}

impl From<RawGrammar> for StructuralGrammar {
    fn from(raw: RawGrammar) -> Self {
        let mut grammar = StructuralGrammar::new(raw.name);
        for name in raw.rules.keys() {
            grammar.declare(RuleDecl::new(name.as_str(), None));
        }
        let bodies = raw
            .rules
            .values()
            .chain(raw.extras.iter())
            .chain(raw.externals.iter());
        for body in bodies {
            collect_symbols(body, &mut grammar);
        }
        grammar
    }
}

fn collect_symbols(value: &Value, grammar: &mut StructuralGrammar) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("SYMBOL")
                && let Some(name) = map.get("name").and_then(Value::as_str)
            {
                grammar.reference(name);
            }
            for child in map.values() {
                collect_symbols(child, grammar);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_symbols(item, grammar);
            }
        }
        _ => {}
    }
}
