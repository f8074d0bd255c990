//! Generated-Go grammar: logos lexer + tolerant parser into a rowan CST.

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{GoLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
