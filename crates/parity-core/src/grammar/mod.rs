//! Structural grammar model.
//!
//! Parity checks only need to know which rules a tree-sitter grammar declares
//! and which rule names its bodies reference, so the model keeps exactly that.
//! The generated `grammar.json` is read here; `grammar.js` sources are scanned
//! by `parity-lib`.

mod json;
mod types;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod types_tests;

pub use json::GrammarError;
pub use types::{RuleDecl, StructuralGrammar};
