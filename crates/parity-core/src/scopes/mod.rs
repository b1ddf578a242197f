//! Reference scope grammar model.
//!
//! A TextMate grammar (`*.tmLanguage.json`) is parsed into a typed tree and
//! flattened into scope declarations. Only presence matters for parity, but
//! every declaration keeps the document path it came from for reports.

mod json;
mod types;


pub use json::ScopeGrammarError;
pub use types::{ScopeDecl, ScopeGrammar, ScopeKey, is_under};
