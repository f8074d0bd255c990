//! Logos-based lexer for the proto grammar.

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
    // KEYWORDS (before Ident so exact matches win)
    // =========================================================================
    #[token("syntax")]
    SyntaxKw,
    #[token("edition")]
    EditionKw,
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("public")]
    PublicKw,
    #[token("weak")]
    WeakKw,
    #[token("option")]
    OptionKw,
    #[token("message")]
    MessageKw,
    #[token("enum")]
    EnumKw,
    #[token("oneof")]
    OneofKw,
    #[token("repeated")]
    RepeatedKw,
    #[token("optional")]
    OptionalKw,
    #[token("required")]
    RequiredKw,
    #[token("map")]
    MapKw,
    #[token("reserved")]
    ReservedKw,
    #[token("to")]
    ToKw,
    #[token("max")]
    MaxKw,
    #[token("service")]
    ServiceKw,
    #[token("rpc")]
    RpcKw,
    #[token("returns")]
    ReturnsKw,
    #[token("stream")]
    StreamKw,
    #[token("extend")]
    ExtendKw,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    // =========================================================================
    // PUNCTUATION
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
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
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
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("/")]
    Slash,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::SyntaxKw => SyntaxKind::SYNTAX_KW,
            LogosToken::EditionKw => SyntaxKind::EDITION_KW,
            LogosToken::PackageKw => SyntaxKind::PACKAGE_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::WeakKw => SyntaxKind::WEAK_KW,
            LogosToken::OptionKw => SyntaxKind::OPTION_KW,
            LogosToken::MessageKw => SyntaxKind::MESSAGE_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::OneofKw => SyntaxKind::ONEOF_KW,
            LogosToken::RepeatedKw => SyntaxKind::REPEATED_KW,
            LogosToken::OptionalKw => SyntaxKind::OPTIONAL_KW,
            LogosToken::RequiredKw => SyntaxKind::REQUIRED_KW,
            LogosToken::MapKw => SyntaxKind::MAP_KW,
            LogosToken::ReservedKw => SyntaxKind::RESERVED_KW,
            LogosToken::ToKw => SyntaxKind::TO_KW,
            LogosToken::MaxKw => SyntaxKind::MAX_KW,
            LogosToken::ServiceKw => SyntaxKind::SERVICE_KW,
            LogosToken::RpcKw => SyntaxKind::RPC_KW,
            LogosToken::ReturnsKw => SyntaxKind::RETURNS_KW,
            LogosToken::StreamKw => SyntaxKind::STREAM_KW,
            LogosToken::ExtendKw => SyntaxKind::EXTEND_KW,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Int => SyntaxKind::INT,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Slash => SyntaxKind::SLASH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_message_decl() {
        let kinds: Vec<_> = tokenize("message Order { int32 item_count = 1; }")
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::MESSAGE_KW,
                SyntaxKind::IDENT,
                SyntaxKind::L_BRACE,
                SyntaxKind::IDENT,
                SyntaxKind::IDENT,
                SyntaxKind::EQ,
                SyntaxKind::INT,
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_BRACE,
            ]
        );
    }

    #[test]
    fn lossless_offsets() {
        let input = "enum Status {\n  ACTIVE = 0;\n}";
        let tokens = tokenize(input);
        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
        assert_eq!(u32::from(tokens[0].offset), 0);
    }

    #[test]
    fn unknown_input_becomes_error_token() {
        let tokens = tokenize("message §");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::ERROR));
    }
}
