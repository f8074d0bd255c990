//! Tolerant recursive descent parser for generated Go files.
//!
//! Only the declarations the walker needs are given structure: `type`
//! specs (structs and scalar aliases) and `const` specs. Function and var
//! declarations are kept in the tree as opaque, brace-balanced token runs
//! so a full `.pb.go` file parses front to back without giving up.

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

/// Parse Go source into a CST.
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Kinds that start a top-level declaration; recovery targets.
const TOP_LEVEL_START: &[SyntaxKind] = &[
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::FUNC_KW,
];

/// Kinds that may start a type expression.
const TYPE_START: &[SyntaxKind] = &[
    SyntaxKind::IDENT,
    SyntaxKind::STAR,
    SyntaxKind::L_BRACKET,
    SyntaxKind::MAP_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::ARROW,
    SyntaxKind::CHAN_KW,
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

    /// Peek the nth non-trivia kind from the current position.
    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
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

    /// Consume one bracketed group (`{}`, `[]` or `()`), balancing all
    /// three bracket kinds inside it, or a single token otherwise.
    fn consume_balanced(&mut self) {
        let open = self.current_kind();
        let close = match open {
            SyntaxKind::L_BRACE => SyntaxKind::R_BRACE,
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            _ => {
                self.bump();
                return;
            }
        };
        self.bump();
        let mut depth = 1i32;
        while !self.at_eof() && depth > 0 {
            let kind = self.current_kind();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            }
            self.bump();
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = PackageClause? (ImportDecl | TypeDecl | ConstDecl
    ///             | VarDecl | FuncDecl)*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            match self.current_kind() {
                SyntaxKind::PACKAGE_KW => self.parse_package_clause(),
                SyntaxKind::IMPORT_KW => self.parse_import_decl(),
                SyntaxKind::TYPE_KW => self.parse_type_decl(),
                SyntaxKind::CONST_KW => self.parse_const_decl(),
                SyntaxKind::VAR_KW => self.parse_var_decl(),
                SyntaxKind::FUNC_KW => self.parse_func_decl(),
                SyntaxKind::SEMICOLON => self.bump(),
                _ => self.error_recover("expected top-level declaration", TOP_LEVEL_START),
            }
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// PackageClause = 'package' IDENT
    fn parse_package_clause(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_CLAUSE);
        self.bump(); // package
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// ImportDecl = 'import' (ImportSpec | '(' ...opaque... ')')
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump(); // import
        self.skip_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            self.consume_balanced();
        } else {
            // optional alias or dot before the path
            if self.eat(SyntaxKind::IDENT) || self.eat(SyntaxKind::DOT) {
                self.skip_trivia();
            }
            self.expect(SyntaxKind::STRING);
        }
        self.finish_node();
    }

    /// TypeDecl = 'type' (TypeSpec | '(' TypeSpec* ')')
    fn parse_type_decl(&mut self) {
        self.start_node(SyntaxKind::TYPE_DECL);
        self.bump(); // type
        self.skip_trivia();
        if self.eat(SyntaxKind::L_PAREN) {
            loop {
                self.skip_trivia();
                if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                    break;
                }
                let pos_before = self.pos;
                self.parse_type_spec();
                if self.pos == pos_before && !self.at_eof() {
                    self.bump();
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        } else {
            self.parse_type_spec();
        }
        self.finish_node();
    }

    /// TypeSpec = IDENT '='? (StructType | TypeExpr)
    fn parse_type_spec(&mut self) {
        self.start_node(SyntaxKind::TYPE_SPEC);
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.eat(SyntaxKind::EQ); // alias form `type A = B`
        self.skip_trivia();
        if self.at(SyntaxKind::STRUCT_KW) {
            self.parse_struct_type();
        } else {
            self.parse_type_expr();
        }
        self.finish_node();
    }

    /// StructType = 'struct' FieldDeclList
    fn parse_struct_type(&mut self) {
        self.start_node(SyntaxKind::STRUCT_TYPE);
        self.bump(); // struct
        self.skip_trivia();

        self.start_node(SyntaxKind::FIELD_DECL_LIST);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            match self.current_kind() {
                SyntaxKind::R_BRACE => break,
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::IDENT => self.parse_field_decl(),
                SyntaxKind::STAR => self.parse_field_decl(), // embedded pointer
                _ => self.error_recover(
                    "expected struct field",
                    &[SyntaxKind::R_BRACE, SyntaxKind::IDENT],
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

    /// FieldDecl = IDENT TypeExpr Tag? | EmbeddedField Tag?
    ///
    /// The member name is the only IDENT token that is a direct child of
    /// the FIELD_DECL node; the type lives inside TYPE_EXPR. An embedded
    /// field (`pkg.Type` with no name) keeps everything inside TYPE_EXPR.
    fn parse_field_decl(&mut self) {
        self.start_node(SyntaxKind::FIELD_DECL);
        if self.at(SyntaxKind::IDENT) && self.nth(1) != SyntaxKind::DOT {
            self.bump(); // member name
            self.skip_trivia();
            if self.at_any(TYPE_START) {
                self.parse_type_expr();
            }
        } else {
            // embedded field: qualified type with no member name
            self.parse_type_expr();
        }
        self.skip_trivia();
        let _ = self.eat(SyntaxKind::RAW_STRING) || self.eat(SyntaxKind::STRING); // tag
        self.finish_node();
    }

    /// TypeExpr = ('*' | '[' INT? ']' | 'map' '[' TypeExpr ']' | '<-'? 'chan')*
    ///            (QualifiedIdent | StructType | 'interface' '{...}')
    fn parse_type_expr(&mut self) {
        self.start_node(SyntaxKind::TYPE_EXPR);
        self.parse_type_expr_inner();
        self.finish_node();
    }

    fn parse_type_expr_inner(&mut self) {
        loop {
            self.skip_trivia();
            match self.current_kind() {
                SyntaxKind::STAR => {
                    self.bump();
                }
                SyntaxKind::L_BRACKET => {
                    self.bump();
                    self.skip_trivia();
                    self.eat(SyntaxKind::INT); // array length, absent for slices
                    self.skip_trivia();
                    self.expect(SyntaxKind::R_BRACKET);
                }
                SyntaxKind::MAP_KW => {
                    self.bump();
                    self.skip_trivia();
                    self.expect(SyntaxKind::L_BRACKET);
                    self.parse_type_expr_inner();
                    self.skip_trivia();
                    self.expect(SyntaxKind::R_BRACKET);
                }
                SyntaxKind::ARROW => {
                    self.bump();
                }
                SyntaxKind::CHAN_KW => {
                    self.bump();
                    self.skip_trivia();
                    self.eat(SyntaxKind::ARROW);
                }
                _ => break,
            }
        }
        self.skip_trivia();
        match self.current_kind() {
            SyntaxKind::STRUCT_KW => self.parse_struct_type(),
            SyntaxKind::INTERFACE_KW => {
                self.bump();
                self.skip_trivia();
                if self.at(SyntaxKind::L_BRACE) {
                    self.consume_balanced();
                }
            }
            SyntaxKind::IDENT => {
                self.bump();
                if self.at(SyntaxKind::DOT) {
                    self.bump();
                    self.expect(SyntaxKind::IDENT);
                }
            }
            _ => self.error("expected type"),
        }
    }

    /// ConstDecl = 'const' (ConstSpec | '(' ConstSpec* ')')
    fn parse_const_decl(&mut self) {
        self.start_node(SyntaxKind::CONST_DECL);
        self.bump(); // const
        self.skip_trivia();
        if self.eat(SyntaxKind::L_PAREN) {
            loop {
                self.skip_trivia();
                if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                    break;
                }
                let pos_before = self.pos;
                if self.at(SyntaxKind::IDENT) {
                    self.parse_const_spec();
                } else {
                    self.error_recover(
                        "expected const spec",
                        &[SyntaxKind::R_PAREN, SyntaxKind::IDENT],
                    );
                }
                if self.pos == pos_before && !self.at_eof() {
                    self.bump();
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        } else {
            self.parse_const_spec();
        }
        self.finish_node();
    }

    /// ConstSpec = IDENT TypeExpr? ('=' Value)?
    ///
    /// In generated code this is `Name AliasType = literal`; the walker
    /// pairs the name IDENT with the alias IDENT inside TYPE_EXPR.
    fn parse_const_spec(&mut self) {
        self.start_node(SyntaxKind::CONST_SPEC);
        self.bump(); // name
        self.skip_trivia();
        if self.at(SyntaxKind::IDENT) || self.at_any(TYPE_START) {
            self.parse_type_expr();
            self.skip_trivia();
        }
        if self.eat(SyntaxKind::EQ) {
            self.skip_trivia();
            self.parse_const_value();
        }
        self.finish_node();
    }

    /// A const initializer: a literal, `iota`, or a small unary/shift
    /// expression over them. Anything fancier recovers at the next spec.
    fn parse_const_value(&mut self) {
        self.eat(SyntaxKind::MINUS);
        if !(self.eat(SyntaxKind::INT)
            || self.eat(SyntaxKind::FLOAT)
            || self.eat(SyntaxKind::STRING)
            || self.eat(SyntaxKind::RUNE)
            || self.eat(SyntaxKind::IOTA_KW)
            || self.eat(SyntaxKind::IDENT))
        {
            self.error("expected const value");
            return;
        }
        self.skip_trivia();
        // tolerate `1 << iota` style expressions
        if self.eat(SyntaxKind::LT_LT)
            || self.eat(SyntaxKind::GT_GT)
            || self.eat(SyntaxKind::PLUS)
            || self.eat(SyntaxKind::MINUS)
            || self.eat(SyntaxKind::STAR)
            || self.eat(SyntaxKind::PIPE)
        {
            self.skip_trivia();
            self.eat(SyntaxKind::MINUS);
            let _ = self.eat(SyntaxKind::INT)
                || self.eat(SyntaxKind::IOTA_KW)
                || self.eat(SyntaxKind::IDENT);
        }
    }

    /// VarDecl = 'var' ...opaque until the next top-level declaration...
    fn parse_var_decl(&mut self) {
        self.start_node(SyntaxKind::VAR_DECL);
        self.bump(); // var
        self.skip_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            self.consume_balanced();
        } else {
            while !self.at_eof() && !self.at_any(TOP_LEVEL_START) {
                self.consume_balanced();
                self.skip_trivia();
            }
        }
        self.finish_node();
    }

    /// FuncDecl = 'func' ...signature... Body
    ///
    /// Everything after the keyword is consumed opaquely; the first bare
    /// `{` group at the top level is taken to be the body.
    fn parse_func_decl(&mut self) {
        self.start_node(SyntaxKind::FUNC_DECL);
        self.bump(); // func
        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            if self.at(SyntaxKind::L_BRACE) {
                self.consume_balanced(); // the body
                break;
            }
            if self.at_any(TOP_LEVEL_START) {
                break; // bodyless declaration, next decl already started
            }
            self.consume_balanced();
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"
package model

import (
	protoreflect "google.golang.org/protobuf/reflect/protoreflect"
)

type Status int32

const (
	Status_ACTIVE   Status = 0
	Status_INACTIVE Status = 1
)

type Order struct {
	state         protoimpl.MessageState
	sizeCache     protoimpl.SizeCache
	unknownFields protoimpl.UnknownFields

	ItemCount int32 `protobuf:"varint,1,opt,name=item_count,json=itemCount,proto3" json:"item_count,omitempty"`
}

func (x *Order) GetItemCount() int32 {
	if x != nil {
		return x.ItemCount
	}
	return 0
}

var file_model_proto_rawDesc = []byte{
	0x0a, 0x0b,
}
"#;

    #[test]
    fn parses_generated_file_shape() {
        let parsed = parse(GENERATED);
        let root = parsed.syntax();
        let kinds: Vec<_> = root.descendants().map(|n| n.kind()).collect();
        assert!(kinds.contains(&SyntaxKind::TYPE_SPEC));
        assert!(kinds.contains(&SyntaxKind::STRUCT_TYPE));
        assert!(kinds.contains(&SyntaxKind::FIELD_DECL));
        assert!(kinds.contains(&SyntaxKind::CONST_SPEC));
        assert!(kinds.contains(&SyntaxKind::FUNC_DECL));
        assert!(kinds.contains(&SyntaxKind::VAR_DECL));
    }

    #[test]
    fn lossless_round_trip() {
        let parsed = parse(GENERATED);
        assert_eq!(parsed.syntax().text().to_string(), GENERATED);
    }

    #[test]
    fn clean_parse_has_no_errors() {
        let parsed = parse(GENERATED);
        assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    }

    #[test]
    fn const_spec_count() {
        let parsed = parse(GENERATED);
        let specs = parsed
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::CONST_SPEC)
            .count();
        assert_eq!(specs, 2);
    }
}
