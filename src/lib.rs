//! # pbleap-core
//!
//! Core library for cross-navigation between a Protocol Buffers schema and
//! the Go source generated from it: jump from a field in `model.proto` to
//! the matching struct member in `model.pb.go`, and back.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → correspondence coordinator (goto-style navigation)
//!   ↓
//! walk      → address model + per-grammar walkers (the engine)
//!   ↓
//! syntax    → typed AST facades over the untyped CSTs
//!   ↓
//! parser    → logos lexers, recursive-descent parsers, rowan CSTs
//!   ↓
//! base      → primitives (Position, LineIndex, naming codec, pairing)
//! ```
//!
//! The engine is computation-only: parsing and tree-walking are pure,
//! synchronous functions of the supplied text. Reading the partner file is
//! the caller's job (see [`ide::Navigator::goto_partner`]).

/// Foundation types: positions, line index, naming codec, artifact pairing
pub mod base;

/// Parsers: one logos lexer + recursive-descent parser per grammar
pub mod parser;

/// Typed AST facades over the rowan CSTs
pub mod syntax;

/// The correspondence engine: addresses and per-grammar walkers
pub mod walk;

/// Coordinator: position in one artifact → location in its partner
pub mod ide;

// Re-export foundation types
pub use base::{ArtifactKind, LineIndex, PairingMap, Position, Span};
pub use ide::{GotoResult, GotoTarget, Navigator};
pub use walk::{Address, AddressParseError, Artifact, Step, StepKind, Target};
