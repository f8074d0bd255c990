//! Syntax kinds for the generated-Go CST.
//!
//! This is deliberately a subset: the walker only needs struct type
//! declarations, scalar alias declarations, and const specs. Function and
//! var bodies are consumed as opaque token runs.

/// All syntax kinds (tokens and nodes) in the Go grammar subset.
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
    IDENT,       // identifier
    INT,         // 42, 0x2a
    FLOAT,       // 3.14
    STRING,      // "interpreted"
    RAW_STRING,  // `raw`, used for struct tags
    RUNE,        // 'x'

    // =========================================================================
    // PUNCTUATION & OPERATORS
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COMMA,       // ,
    DOT,         // .
    DOT_DOT_DOT, // ...
    EQ,          // =
    COLON_EQ,    // :=
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    ARROW,       // <-
    STAR,        // *
    AMP,         // &
    AMP_AMP,     // &&
    AMP_CARET,   // &^
    PIPE,        // |
    PIPE_PIPE,   // ||
    CARET,       // ^
    PLUS,        // +
    PLUS_PLUS,   // ++
    MINUS,       // -
    MINUS_MINUS, // --
    SLASH,       // /
    PERCENT,     // %
    LT_LT,       // <<
    GT_GT,       // >>
    BANG,        // !
    TILDE,       // ~
    ASSIGN_OP,   // +=, -=, *=, ... (collapsed, only seen in opaque bodies)

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    PACKAGE_KW,
    IMPORT_KW,
    TYPE_KW,
    STRUCT_KW,
    INTERFACE_KW,
    MAP_KW,
    CHAN_KW,
    CONST_KW,
    VAR_KW,
    FUNC_KW,
    IOTA_KW, // not a real keyword in Go, but worth marking

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_CLAUSE,
    IMPORT_DECL,
    TYPE_DECL,
    TYPE_SPEC,
    STRUCT_TYPE,
    FIELD_DECL_LIST,
    FIELD_DECL,
    TYPE_EXPR,
    CONST_DECL,
    CONST_SPEC,
    VAR_DECL,
    FUNC_DECL,

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
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::IOTA_KW as u16)
    }

    /// Check if this is a punctuation or operator token.
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::ASSIGN_OP as u16)
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
pub enum GoLanguage {}

impl rowan::Language for GoLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<GoLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GoLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GoLanguage>;
