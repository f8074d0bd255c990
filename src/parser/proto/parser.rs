//! Recursive descent parser for the proto grammar.
//!
//! Builds a rowan GreenNode tree from tokens. Supports error recovery and
//! produces a lossless CST; `service` and `extend` blocks are kept as
//! opaque token runs since the walker has no use for their insides.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// Parse result containing the green tree and any errors.
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node.
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse proto source into a CST.
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Kinds that may start a top-level declaration; used for error recovery.
const TOP_LEVEL_START: &[SyntaxKind] = &[
    SyntaxKind::SYNTAX_KW,
    SyntaxKind::EDITION_KW,
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::OPTION_KW,
    SyntaxKind::MESSAGE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::SERVICE_KW,
    SyntaxKind::EXTEND_KW,
];

struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        // Always make progress to prevent infinite loops
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Consume raw tokens up to (and including) a `;` at bracket depth 0.
    /// Used for declarations whose insides don't matter to the walker,
    /// like `option (x) = { a: 1 };`.
    fn consume_until_semicolon(&mut self) {
        let mut depth = 0i32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE | SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_BRACE | SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN => {
                    if depth == 0 {
                        // Unbalanced closer belongs to the enclosing body
                        return;
                    }
                    depth -= 1;
                }
                SyntaxKind::SEMICOLON if depth == 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Consume a raw `{ ... }` region, balancing braces.
    fn consume_balanced_braces(&mut self) {
        self.skip_trivia();
        if !self.expect(SyntaxKind::L_BRACE) {
            return;
        }
        let mut depth = 1i32;
        while !self.at_eof() && depth > 0 {
            match self.current_kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => depth -= 1,
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = (SyntaxDecl | PackageDecl | ImportDecl | OptionDecl
    ///              | Message | Enum | Service | Extend | ';')*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_top_level();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    fn parse_top_level(&mut self) {
        match self.current_kind() {
            SyntaxKind::SYNTAX_KW | SyntaxKind::EDITION_KW => self.parse_syntax_decl(),
            SyntaxKind::PACKAGE_KW => self.parse_package_decl(),
            SyntaxKind::IMPORT_KW => self.parse_import_decl(),
            SyntaxKind::OPTION_KW => self.parse_option_decl(),
            SyntaxKind::MESSAGE_KW => self.parse_message(),
            SyntaxKind::ENUM_KW => self.parse_enum(),
            SyntaxKind::SERVICE_KW => self.parse_service(),
            SyntaxKind::EXTEND_KW => self.parse_extend(),
            SyntaxKind::SEMICOLON => self.bump(),
            _ => self.error_recover("expected top-level declaration", TOP_LEVEL_START),
        }
    }

    /// SyntaxDecl = ('syntax' | 'edition') '=' STRING ';'
    fn parse_syntax_decl(&mut self) {
        self.start_node(SyntaxKind::SYNTAX_DECL);
        self.bump(); // syntax / edition
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        if !self.eat(SyntaxKind::STRING) {
            self.eat(SyntaxKind::INT);
        }
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// PackageDecl = 'package' IDENT ('.' IDENT)* ';'
    fn parse_package_decl(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_DECL);
        self.bump(); // package
        self.skip_trivia();
        self.parse_qualified_ident();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ImportDecl = 'import' ('public' | 'weak')? STRING ';'
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump(); // import
        self.skip_trivia();
        if self.eat(SyntaxKind::PUBLIC_KW) || self.eat(SyntaxKind::WEAK_KW) {
            self.skip_trivia();
        }
        self.expect(SyntaxKind::STRING);
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// OptionDecl = 'option' ...anything... ';'
    fn parse_option_decl(&mut self) {
        self.start_node(SyntaxKind::OPTION_DECL);
        self.bump(); // option
        self.consume_until_semicolon();
        self.finish_node();
    }

    /// ReservedDecl = 'reserved' ...ranges or names... ';'
    fn parse_reserved(&mut self) {
        self.start_node(SyntaxKind::RESERVED_DECL);
        self.bump(); // reserved
        self.consume_until_semicolon();
        self.finish_node();
    }

    /// Message = 'message' IDENT MessageBody
    fn parse_message(&mut self) {
        self.start_node(SyntaxKind::MESSAGE);
        self.bump(); // message
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.parse_message_body();
        self.finish_node();
    }

    /// MessageBody = '{' (Message | Enum | Oneof | Field | OptionDecl
    ///                   | ReservedDecl | ';')* '}'
    fn parse_message_body(&mut self) {
        self.start_node(SyntaxKind::MESSAGE_BODY);
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            match self.current_kind() {
                SyntaxKind::R_BRACE => break,
                SyntaxKind::MESSAGE_KW => self.parse_message(),
                SyntaxKind::ENUM_KW => self.parse_enum(),
                SyntaxKind::ONEOF_KW => self.parse_oneof(),
                SyntaxKind::OPTION_KW => self.parse_option_decl(),
                SyntaxKind::RESERVED_KW => self.parse_reserved(),
                SyntaxKind::EXTEND_KW => self.parse_extend(),
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::REPEATED_KW
                | SyntaxKind::OPTIONAL_KW
                | SyntaxKind::REQUIRED_KW
                | SyntaxKind::MAP_KW
                | SyntaxKind::DOT
                | SyntaxKind::IDENT => self.parse_field(),
                _ => self.error_recover(
                    "expected message member",
                    &[
                        SyntaxKind::R_BRACE,
                        SyntaxKind::MESSAGE_KW,
                        SyntaxKind::ENUM_KW,
                        SyntaxKind::ONEOF_KW,
                        SyntaxKind::SEMICOLON,
                    ],
                ),
            }
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Field = ('repeated' | 'optional' | 'required')? FieldType IDENT
    ///         '=' '-'? INT FieldOptions? ';'
    ///
    /// The declared name is the only IDENT token that is a direct child of
    /// the FIELD node; the type lives inside FIELD_TYPE.
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::FIELD);
        if self.eat(SyntaxKind::REPEATED_KW)
            || self.eat(SyntaxKind::OPTIONAL_KW)
            || self.eat(SyntaxKind::REQUIRED_KW)
        {
            self.skip_trivia();
        }
        self.parse_field_type();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        self.eat(SyntaxKind::MINUS);
        self.expect(SyntaxKind::INT);
        self.skip_trivia();
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_field_options();
            self.skip_trivia();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// FieldType = 'map' '<' Type ',' Type '>' | '.'? IDENT ('.' IDENT)*
    fn parse_field_type(&mut self) {
        self.start_node(SyntaxKind::FIELD_TYPE);
        if self.eat(SyntaxKind::MAP_KW) {
            self.skip_trivia();
            self.expect(SyntaxKind::LT);
            self.skip_trivia();
            self.parse_qualified_ident();
            self.skip_trivia();
            self.expect(SyntaxKind::COMMA);
            self.skip_trivia();
            self.parse_qualified_ident();
            self.skip_trivia();
            self.expect(SyntaxKind::GT);
        } else {
            self.eat(SyntaxKind::DOT);
            self.parse_qualified_ident();
        }
        self.finish_node();
    }

    /// FieldOptions = '[' ...anything balanced... ']'
    fn parse_field_options(&mut self) {
        self.start_node(SyntaxKind::FIELD_OPTIONS);
        self.bump(); // [
        let mut depth = 1i32;
        while !self.at_eof() && depth > 0 {
            match self.current_kind() {
                SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACKET => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// Oneof = 'oneof' IDENT OneofBody
    fn parse_oneof(&mut self) {
        self.start_node(SyntaxKind::ONEOF);
        self.bump(); // oneof
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();

        self.start_node(SyntaxKind::ONEOF_BODY);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            match self.current_kind() {
                SyntaxKind::R_BRACE => break,
                SyntaxKind::OPTION_KW => self.parse_option_decl(),
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::DOT | SyntaxKind::IDENT | SyntaxKind::MAP_KW => self.parse_field(),
                _ => self.error_recover(
                    "expected oneof member",
                    &[SyntaxKind::R_BRACE, SyntaxKind::SEMICOLON],
                ),
            }
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();

        self.finish_node();
    }

    /// Enum = 'enum' IDENT EnumBody
    fn parse_enum(&mut self) {
        self.start_node(SyntaxKind::ENUM);
        self.bump(); // enum
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.parse_enum_body();
        self.finish_node();
    }

    /// EnumBody = '{' (EnumValue | OptionDecl | ReservedDecl | ';')* '}'
    fn parse_enum_body(&mut self) {
        self.start_node(SyntaxKind::ENUM_BODY);
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            match self.current_kind() {
                SyntaxKind::R_BRACE => break,
                SyntaxKind::OPTION_KW => self.parse_option_decl(),
                SyntaxKind::RESERVED_KW => self.parse_reserved(),
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::IDENT => self.parse_enum_value(),
                _ => self.error_recover(
                    "expected enum value",
                    &[SyntaxKind::R_BRACE, SyntaxKind::SEMICOLON],
                ),
            }
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// EnumValue = IDENT '=' '-'? INT FieldOptions? ';'
    fn parse_enum_value(&mut self) {
        self.start_node(SyntaxKind::ENUM_VALUE);
        self.bump(); // name
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        self.eat(SyntaxKind::MINUS);
        self.expect(SyntaxKind::INT);
        self.skip_trivia();
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_field_options();
            self.skip_trivia();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Service = 'service' IDENT '{' ...opaque... '}'
    fn parse_service(&mut self) {
        self.start_node(SyntaxKind::SERVICE);
        self.bump(); // service
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.consume_balanced_braces();
        self.finish_node();
    }

    /// Extend = 'extend' QualifiedIdent '{' ...opaque... '}'
    fn parse_extend(&mut self) {
        self.start_node(SyntaxKind::EXTEND);
        self.bump(); // extend
        self.skip_trivia();
        self.eat(SyntaxKind::DOT);
        self.parse_qualified_ident();
        self.consume_balanced_braces();
        self.finish_node();
    }

    fn parse_qualified_ident(&mut self) {
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) {
            self.bump();
            self.expect(SyntaxKind::IDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_kinds(input: &str) -> Vec<SyntaxKind> {
        parse(input).syntax().descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn parses_clean_message() {
        let parsed = parse("message Order { int32 item_count = 1; }");
        assert!(parsed.ok(), "errors: {:?}", parsed.errors);
        let kinds = node_kinds("message Order { int32 item_count = 1; }");
        assert!(kinds.contains(&SyntaxKind::MESSAGE));
        assert!(kinds.contains(&SyntaxKind::FIELD));
        assert!(kinds.contains(&SyntaxKind::FIELD_TYPE));
    }

    #[test]
    fn lossless_round_trip() {
        let input = "syntax = \"proto3\";\n\nmessage A {\n  // count\n  int32 n = 1;\n}\n";
        let parsed = parse(input);
        assert_eq!(parsed.syntax().text().to_string(), input);
    }

    #[test]
    fn recovers_from_garbage() {
        let parsed = parse("message A { ??? } message B { int32 x = 1; }");
        let messages = parsed
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::MESSAGE)
            .count();
        assert_eq!(messages, 2);
        assert!(!parsed.ok());
    }

    #[test]
    fn service_is_opaque() {
        let parsed = parse("service S { rpc Get (Req) returns (Res); }");
        assert!(parsed
            .syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::SERVICE));
    }
}
