//! Lexers and parsers, one per artifact grammar.
//!
//! Each grammar builds a lossless rowan CST over its own [`rowan::Language`]
//! so walkers can recover exact source spans for every identifier.

pub mod go;
pub mod proto;
