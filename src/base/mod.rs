//! Foundation types for pbleap.
//!
//! This module provides the primitives used throughout the engine:
//! - [`Position`], [`Span`] - line/column coordinates for navigation results
//! - [`LineIndex`] - position ↔ byte-offset conversion for one text
//! - [`names`] - the naming-convention codec shared by both walkers
//! - [`ArtifactKind`] - which grammar a file belongs to
//! - [`PairingMap`] - schema-file ↔ generated-file mapping
//!
//! This module has NO dependencies on other pbleap modules.

mod artifact;
mod line_index;
pub mod names;
mod pairing;
mod position;

pub use artifact::{ArtifactKind, GO_EXTENSION, PROTO_EXTENSION};
pub use line_index::LineIndex;
pub use pairing::PairingMap;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
