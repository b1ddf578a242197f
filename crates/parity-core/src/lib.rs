#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core document models for grammar parity checks.
//!
//! Two documents are modeled here, both reduced to what parity checks need:
//! - **Structural grammar** (`StructuralGrammar`): rule declarations and rule
//!   references of a tree-sitter grammar
//! - **Reference scopes** (`ScopeGrammar`): every scope name declared by a
//!   TextMate grammar, flattened regardless of nesting depth
//!
//! Parsing `grammar.js` sources lives in `parity-lib`; this crate only reads the
//! JSON forms.

pub mod colors;
pub mod grammar;
mod json;
pub mod scopes;
pub mod utils;


pub use grammar::{GrammarError, RuleDecl, StructuralGrammar};
pub use scopes::{ScopeDecl, ScopeGrammar, ScopeGrammarError, ScopeKey};
