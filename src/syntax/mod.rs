//! Typed AST wrappers over the untyped rowan CSTs.
//!
//! Each grammar gets its own facade module; both share the [`AstNode`]
//! trait so walkers can stay generic over "a node with a cast".

/// Trait for AST nodes that wrap a SyntaxNode of some grammar.
pub trait AstNode: Sized {
    type Language: rowan::Language;

    fn can_cast(kind: <Self::Language as rowan::Language>::Kind) -> bool;
    fn cast(node: rowan::SyntaxNode<Self::Language>) -> Option<Self>;
    fn syntax(&self) -> &rowan::SyntaxNode<Self::Language>;
}

/// Generate a newtype facade over a single-kind SyntaxNode.
///
/// Expects `SyntaxNode`, `SyntaxKind` and `Language` aliases to be in scope
/// in the module that invokes it.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl $crate::syntax::AstNode for $name {
            type Language = Language;

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// Submodules are declared after the macro so it is in textual scope.
pub mod go;
pub mod proto;
