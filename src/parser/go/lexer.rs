//! Logos-based lexer for the Go grammar subset.
//!
//! The full operator set is tokenized so opaque regions (function bodies,
//! var initializers) lex cleanly; the parser only ever inspects a handful
//! of these kinds.

use logos::Logos;
use rowan::TextSize;

use super::syntax_kind::SyntaxKind;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("type")]
    TypeKw,
    #[token("struct")]
    StructKw,
    #[token("interface")]
    InterfaceKw,
    #[token("map")]
    MapKw,
    #[token("chan")]
    ChanKw,
    #[token("const")]
    ConstKw,
    #[token("var")]
    VarKw,
    #[token("func")]
    FuncKw,
    #[token("iota")]
    IotaKw,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO]?[0-7_]*|[0-9][0-9_]*")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"'([^'\\]|\\.)*'")]
    Rune,

    // =========================================================================
    // MULTI-CHARACTER OPERATORS (must come before single-char)
    // =========================================================================
    #[token("...")]
    DotDotDot,
    #[token(":=")]
    ColonEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<-")]
    Arrow,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("&^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    AssignOp,
    #[token("&^")]
    AmpCaret,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::PackageKw => SyntaxKind::PACKAGE_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::TypeKw => SyntaxKind::TYPE_KW,
            LogosToken::StructKw => SyntaxKind::STRUCT_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::MapKw => SyntaxKind::MAP_KW,
            LogosToken::ChanKw => SyntaxKind::CHAN_KW,
            LogosToken::ConstKw => SyntaxKind::CONST_KW,
            LogosToken::VarKw => SyntaxKind::VAR_KW,
            LogosToken::FuncKw => SyntaxKind::FUNC_KW,
            LogosToken::IotaKw => SyntaxKind::IOTA_KW,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Int => SyntaxKind::INT,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::RawString => SyntaxKind::RAW_STRING,
            LogosToken::Rune => SyntaxKind::RUNE,
            LogosToken::DotDotDot => SyntaxKind::DOT_DOT_DOT,
            LogosToken::ColonEq => SyntaxKind::COLON_EQ,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::Arrow => SyntaxKind::ARROW,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::AssignOp => SyntaxKind::ASSIGN_OP,
            LogosToken::AmpCaret => SyntaxKind::AMP_CARET,
            LogosToken::LtLt => SyntaxKind::LT_LT,
            LogosToken::GtGt => SyntaxKind::GT_GT,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Tilde => SyntaxKind::TILDE,
        }
    }
}
