//! Rule declarations from `grammar.js` sources.
//!
//! The grammar DSL is JavaScript, which is never executed here. Instead a
//! token-level scan finds the keys of the `rules` object and the `$.name`
//! references, which is all a presence check needs.

pub mod lexer;
mod scan;


pub use scan::{Scan, scan};
