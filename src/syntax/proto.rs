//! Typed facades for the proto CST.

use crate::parser::proto::{ProtoLanguage, SyntaxKind, SyntaxNode, SyntaxToken};

use super::AstNode;

type Language = ProtoLanguage;

/// First direct IDENT token child of a node.
///
/// The parser guarantees that for MESSAGE, ENUM, FIELD and ENUM_VALUE the
/// declared name is the only IDENT placed directly under the node; type
/// references live inside FIELD_TYPE.
fn name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn messages(&self) -> impl Iterator<Item = Message> + '_ {
        self.0.children().filter_map(Message::cast)
    }

    pub fn enums(&self) -> impl Iterator<Item = Enum> + '_ {
        self.0.children().filter_map(Enum::cast)
    }
}

// ============================================================================
// Messages
// ============================================================================

ast_node!(Message, MESSAGE);

impl Message {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }

    pub fn body(&self) -> Option<MessageBody> {
        self.0.children().find_map(MessageBody::cast)
    }
}

ast_node!(MessageBody, MESSAGE_BODY);

impl MessageBody {
    pub fn messages(&self) -> impl Iterator<Item = Message> + '_ {
        self.0.children().filter_map(Message::cast)
    }

    pub fn enums(&self) -> impl Iterator<Item = Enum> + '_ {
        self.0.children().filter_map(Enum::cast)
    }

    /// All fields of the message, including those declared inside oneofs.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().flat_map(|child| match child.kind() {
            SyntaxKind::FIELD => Field::cast(child).into_iter().collect::<Vec<_>>(),
            SyntaxKind::ONEOF => Oneof::cast(child)
                .and_then(|o| o.body())
                .map(|b| b.fields().collect::<Vec<_>>())
                .unwrap_or_default(),
            _ => Vec::new(),
        })
    }
}

ast_node!(Field, FIELD);

impl Field {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }
}

ast_node!(Oneof, ONEOF);

impl Oneof {
    pub fn body(&self) -> Option<OneofBody> {
        self.0.children().find_map(OneofBody::cast)
    }
}

ast_node!(OneofBody, ONEOF_BODY);

impl OneofBody {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().filter_map(Field::cast)
    }
}

// ============================================================================
// Enums
// ============================================================================

ast_node!(Enum, ENUM);

impl Enum {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }

    pub fn body(&self) -> Option<EnumBody> {
        self.0.children().find_map(EnumBody::cast)
    }
}

ast_node!(EnumBody, ENUM_BODY);

impl EnumBody {
    pub fn values(&self) -> impl Iterator<Item = EnumValue> + '_ {
        self.0.children().filter_map(EnumValue::cast)
    }
}

ast_node!(EnumValue, ENUM_VALUE);

impl EnumValue {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }
}
