//! Syntax kinds for the proto CST.
//!
//! Tokens are leaf nodes (identifiers, keywords, punctuation); composite
//! nodes cover the subset of the proto grammar the walker cares about.

/// All syntax kinds (tokens and nodes) in the proto grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INT,     // 42
    FLOAT,   // 3.14
    STRING,  // "proto3" or 'proto3'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,    // {
    R_BRACE,    // }
    L_BRACKET,  // [
    R_BRACKET,  // ]
    L_PAREN,    // (
    R_PAREN,    // )
    LT,         // <
    GT,         // >
    SEMICOLON,  // ;
    COLON,      // :
    COMMA,      // ,
    DOT,        // .
    EQ,         // =
    MINUS,      // -
    PLUS,       // +
    SLASH,      // /

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    SYNTAX_KW,
    EDITION_KW,
    PACKAGE_KW,
    IMPORT_KW,
    PUBLIC_KW,
    WEAK_KW,
    OPTION_KW,
    MESSAGE_KW,
    ENUM_KW,
    ONEOF_KW,
    REPEATED_KW,
    OPTIONAL_KW,
    REQUIRED_KW,
    MAP_KW,
    RESERVED_KW,
    TO_KW,
    MAX_KW,
    SERVICE_KW,
    RPC_KW,
    RETURNS_KW,
    STREAM_KW,
    EXTEND_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    SOURCE_FILE,
    SYNTAX_DECL,
    PACKAGE_DECL,
    IMPORT_DECL,
    OPTION_DECL,
    MESSAGE,
    MESSAGE_BODY,
    FIELD,
    FIELD_TYPE,
    FIELD_OPTIONS,
    ONEOF,
    ONEOF_BODY,
    ENUM,
    ENUM_BODY,
    ENUM_VALUE,
    RESERVED_DECL,
    SERVICE,
    EXTEND,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword.
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::SYNTAX_KW as u16) && (self as u16) <= (Self::EXTEND_KW as u16)
    }

    /// Check if this is a punctuation token.
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::SLASH as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtoLanguage {}

impl rowan::Language for ProtoLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ProtoLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ProtoLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ProtoLanguage>;
