//! Proto grammar: logos lexer + recursive-descent parser into a rowan CST.

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{ProtoLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
