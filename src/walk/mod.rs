//! Walkers: grammar-specific address computation and resolution.
//!
//! [`Artifact`] is the tagged dispatcher over the two grammars; the
//! per-grammar logic lives in [`proto`] and [`go`].

mod address;
pub mod go;
pub mod proto;

pub use address::{Address, AddressParseError, Step, StepKind, Target};

use rowan::TokenAtOffset;

use crate::base::{ArtifactKind, LineIndex, Position, Span};
use crate::parser;

/// A parsed artifact: the CST plus the line index for its text, tagged by
/// grammar. Parsing is fresh per request; nothing here is cached.
pub enum Artifact {
    Proto {
        parse: parser::proto::Parse,
        line_index: LineIndex,
    },
    Go {
        parse: parser::go::Parse,
        line_index: LineIndex,
    },
}

impl Artifact {
    pub fn parse(kind: ArtifactKind, text: &str) -> Self {
        let line_index = LineIndex::new(text);
        match kind {
            ArtifactKind::Proto => Self::Proto {
                parse: parser::proto::parse(text),
                line_index,
            },
            ArtifactKind::Go => Self::Go {
                parse: parser::go::parse(text),
                line_index,
            },
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Proto { .. } => ArtifactKind::Proto,
            Self::Go { .. } => ArtifactKind::Go,
        }
    }

    pub fn line_index(&self) -> &LineIndex {
        match self {
            Self::Proto { line_index, .. } | Self::Go { line_index, .. } => line_index,
        }
    }

    /// Number of syntax errors the parser recovered from.
    pub fn error_count(&self) -> usize {
        match self {
            Self::Proto { parse, .. } => parse.errors.len(),
            Self::Go { parse, .. } => parse.errors.len(),
        }
    }

    /// Compute the canonical address of whatever identifier sits under
    /// `position`. Non-identifier positions yield `None`.
    pub fn compute_address(&self, position: Position) -> Option<Address> {
        match self {
            Self::Proto { parse, line_index } => {
                let offset = line_index.offset(position)?;
                let token = match parse.syntax().token_at_offset(offset) {
                    TokenAtOffset::None => return None,
                    TokenAtOffset::Single(token) => token,
                    // on a boundary, prefer the identifier side
                    TokenAtOffset::Between(left, right) => {
                        if right.kind() == parser::proto::SyntaxKind::IDENT {
                            right
                        } else {
                            left
                        }
                    }
                };
                proto::compute_address(&token)
            }
            Self::Go { parse, line_index } => {
                let offset = line_index.offset(position)?;
                let token = match parse.syntax().token_at_offset(offset) {
                    TokenAtOffset::None => return None,
                    TokenAtOffset::Single(token) => token,
                    TokenAtOffset::Between(left, right) => {
                        if right.kind() == parser::go::SyntaxKind::IDENT {
                            right
                        } else {
                            left
                        }
                    }
                };
                go::compute_address(&token)
            }
        }
    }

    /// Resolve an address to the span of the matched entity's declared
    /// name in this artifact.
    pub fn resolve(&self, address: &Address) -> Option<Span> {
        match self {
            Self::Proto { parse, line_index } => {
                let token = proto::resolve(&parse.syntax(), address)?;
                Some(line_index.span(token.text_range()))
            }
            Self::Go { parse, line_index } => {
                let token = go::resolve(&parse.syntax(), address)?;
                Some(line_index.span(token.text_range()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_kind() {
        let schema = Artifact::parse(ArtifactKind::Proto, "message Order { bool paid = 1; }");
        assert_eq!(schema.kind(), ArtifactKind::Proto);
        assert_eq!(schema.error_count(), 0);
        // cursor on "paid"
        let address = schema.compute_address(Position::new(0, 21)).unwrap();
        assert_eq!(address.to_string(), "container:order/field:paid");
    }

    #[test]
    fn position_over_punctuation_yields_nothing() {
        let schema = Artifact::parse(ArtifactKind::Proto, "message Order { bool paid = 1; }");
        assert!(schema.compute_address(Position::new(0, 14)).is_none());
    }

    #[test]
    fn resolve_maps_token_to_span() {
        let generated = Artifact::parse(
            ArtifactKind::Go,
            "package m\n\ntype Order struct {\n\tPaid bool\n}\n",
        );
        let address: Address = "container:order/field:paid".parse().unwrap();
        let span = generated.resolve(&address).unwrap();
        assert_eq!(span.start, Position::new(3, 1));
        assert_eq!(span.end, Position::new(3, 5));
    }
}
