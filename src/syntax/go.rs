//! Typed facades for the generated-Go CST.

use crate::parser::go::{GoLanguage, SyntaxKind, SyntaxNode, SyntaxToken};

use super::AstNode;

type Language = GoLanguage;

fn direct_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
}

/// The named type at the core of a TYPE_EXPR. For a qualified reference
/// like `durationpb.Duration` this is the final segment.
fn type_expr_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children()
        .find(|n| n.kind() == SyntaxKind::TYPE_EXPR)
        .and_then(|expr| {
            expr.children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == SyntaxKind::IDENT)
                .last()
        })
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn type_specs(&self) -> impl Iterator<Item = TypeSpec> + '_ {
        self.0
            .children()
            .filter_map(TypeDecl::cast)
            .flat_map(|decl| decl.specs().collect::<Vec<_>>())
    }

    pub fn const_specs(&self) -> impl Iterator<Item = ConstSpec> + '_ {
        self.0
            .children()
            .filter_map(ConstDecl::cast)
            .flat_map(|decl| decl.specs().collect::<Vec<_>>())
    }
}

// ============================================================================
// Type declarations
// ============================================================================

ast_node!(TypeDecl, TYPE_DECL);

impl TypeDecl {
    pub fn specs(&self) -> impl Iterator<Item = TypeSpec> + '_ {
        self.0.children().filter_map(TypeSpec::cast)
    }
}

ast_node!(TypeSpec, TYPE_SPEC);

impl TypeSpec {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_ident(&self.0)
    }

    pub fn struct_type(&self) -> Option<StructType> {
        self.0.children().find_map(StructType::cast)
    }

    pub fn is_struct(&self) -> bool {
        self.struct_type().is_some()
    }

    /// For scalar aliases like `type Status int32`, the underlying type name.
    pub fn alias_type(&self) -> Option<SyntaxToken> {
        type_expr_ident(&self.0)
    }
}

ast_node!(StructType, STRUCT_TYPE);

impl StructType {
    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> + '_ {
        self.0
            .children()
            .filter_map(FieldDeclList::cast)
            .flat_map(|list| list.fields().collect::<Vec<_>>())
    }
}

ast_node!(FieldDeclList, FIELD_DECL_LIST);

impl FieldDeclList {
    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> + '_ {
        self.0.children().filter_map(FieldDecl::cast)
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    /// The member name. Embedded fields carry no name of their own.
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_ident(&self.0)
    }
}

// ============================================================================
// Const declarations
// ============================================================================

ast_node!(ConstDecl, CONST_DECL);

impl ConstDecl {
    pub fn specs(&self) -> impl Iterator<Item = ConstSpec> + '_ {
        self.0.children().filter_map(ConstSpec::cast)
    }
}

ast_node!(ConstSpec, CONST_SPEC);

impl ConstSpec {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_ident(&self.0)
    }

    /// The declared type of the constant, e.g. `Status` in
    /// `Status_ACTIVE Status = 0`.
    pub fn type_name(&self) -> Option<SyntaxToken> {
        type_expr_ident(&self.0)
    }
}
