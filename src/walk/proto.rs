//! Address computation and resolution over the proto CST.
//!
//! The schema side is the easy direction: nesting is syntactic, so the
//! container chain is just the MESSAGE ancestry of the cursor token.

use smol_str::SmolStr;

use crate::base::names::to_snake;
use crate::parser::proto::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::syntax::AstNode;
use crate::syntax::proto::{Enum, EnumValue, Message, MessageBody};

use super::address::{Address, Target};

/// Compute the canonical address of an identifier token, or `None` when
/// the token is not a declared name the engine recognizes.
pub fn compute_address(token: &SyntaxToken) -> Option<Address> {
    if token.kind() != SyntaxKind::IDENT {
        return None;
    }
    let parent = token.parent()?;
    match parent.kind() {
        SyntaxKind::MESSAGE => {
            let containers = enclosing_containers(&parent);
            Some(Address::new(
                containers,
                Target::Container(canonical(token.text())),
            ))
        }
        SyntaxKind::FIELD => {
            let containers = enclosing_containers(&parent);
            // field names are already word-delimited lower-case
            Some(Address::new(containers, Target::Field(token.text().into())))
        }
        SyntaxKind::ENUM => {
            let containers = enclosing_containers(&parent);
            Some(Address::new(
                containers,
                Target::Enum(canonical(token.text())),
            ))
        }
        SyntaxKind::ENUM_VALUE => {
            let enumeration = parent
                .ancestors()
                .find(|n| n.kind() == SyntaxKind::ENUM)
                .and_then(Enum::cast)?;
            let containers = enclosing_containers(enumeration.syntax());
            Some(Address::new(
                containers,
                Target::EnumMember {
                    enumeration: canonical(enumeration.name()?.text()),
                    member: token.text().to_ascii_lowercase().into(),
                },
            ))
        }
        _ => None,
    }
}

/// Resolve an address against a parsed schema, returning the declared-name
/// token of the matched entity.
pub fn resolve(root: &SyntaxNode, address: &Address) -> Option<SyntaxToken> {
    let mut scope = root.clone();
    for name in address.containers() {
        scope = find_message(&scope, name)?.body()?.syntax().clone();
    }
    match address.target() {
        Target::Container(name) => find_message(&scope, name)?.name(),
        Target::Field(name) => find_field(&scope, name)?.name(),
        Target::Enum(name) => find_enum(&scope, name)?.name(),
        Target::EnumMember {
            enumeration,
            member,
        } => find_member(&find_enum(&scope, enumeration)?, member)?.name(),
    }
}

fn canonical(declared: &str) -> SmolStr {
    to_snake(declared).into()
}

/// Declared names of all MESSAGE nodes strictly enclosing `node`,
/// outermost first, in canonical form.
fn enclosing_containers(node: &SyntaxNode) -> Vec<SmolStr> {
    let mut names: Vec<SmolStr> = node
        .ancestors()
        .skip(1)
        .filter(|n| n.kind() == SyntaxKind::MESSAGE)
        .filter_map(Message::cast)
        .filter_map(|m| m.name().map(|t| canonical(t.text())))
        .collect();
    names.reverse();
    names
}

/// Both SOURCE_FILE and MESSAGE_BODY hold their declarations as direct
/// children, so one lookup works for either scope.
fn find_message(scope: &SyntaxNode, name: &str) -> Option<Message> {
    scope
        .children()
        .filter_map(Message::cast)
        .find(|m| m.name().is_some_and(|t| to_snake(t.text()) == name))
}

fn find_enum(scope: &SyntaxNode, name: &str) -> Option<Enum> {
    scope
        .children()
        .filter_map(Enum::cast)
        .find(|e| e.name().is_some_and(|t| to_snake(t.text()) == name))
}

fn find_field(scope: &SyntaxNode, name: &str) -> Option<crate::syntax::proto::Field> {
    MessageBody::cast(scope.clone())?
        .fields()
        .find(|f| f.name().is_some_and(|t| t.text().eq_ignore_ascii_case(name)))
}

fn find_member(enumeration: &Enum, member: &str) -> Option<EnumValue> {
    enumeration
        .body()?
        .values()
        .find(|v| v.name().is_some_and(|t| t.text().eq_ignore_ascii_case(member)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::proto::parse;

    const SCHEMA: &str = r#"
syntax = "proto3";

message Invoice {
  message Order {
    int32 item_count = 1;
  }
  Order order = 1;
}

enum Status {
  ACTIVE = 0;
  INACTIVE = 1;
}

message Account {
  enum Kind {
    PERSONAL = 0;
  }
  Kind kind = 1;
}
"#;

    fn ident(root: &SyntaxNode, text: &str) -> SyntaxToken {
        root.descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT && t.text() == text)
            .unwrap()
    }

    #[test]
    fn nested_field_address() {
        let root = parse(SCHEMA).syntax();
        let address = compute_address(&ident(&root, "item_count")).unwrap();
        assert_eq!(
            address.to_string(),
            "container:invoice/container:order/field:item_count"
        );
    }

    #[test]
    fn nested_container_address() {
        let root = parse(SCHEMA).syntax();
        let token = ident(&root, "Order");
        let address = compute_address(&token).unwrap();
        assert_eq!(address.to_string(), "container:invoice/container:order");
    }

    #[test]
    fn nested_enum_member_address() {
        let root = parse(SCHEMA).syntax();
        let address = compute_address(&ident(&root, "PERSONAL")).unwrap();
        assert_eq!(
            address.to_string(),
            "container:account/enum:kind/enum_member:personal"
        );
    }

    #[test]
    fn resolve_round_trips_field() {
        let root = parse(SCHEMA).syntax();
        let address = compute_address(&ident(&root, "item_count")).unwrap();
        let token = resolve(&root, &address).unwrap();
        assert_eq!(token.text(), "item_count");
        assert_eq!(compute_address(&token).unwrap(), address);
    }

    #[test]
    fn resolve_top_level_enum_member() {
        let root = parse(SCHEMA).syntax();
        let address: Address = "enum:status/enum_member:active".parse().unwrap();
        let token = resolve(&root, &address).unwrap();
        assert_eq!(token.text(), "ACTIVE");
    }

    #[test]
    fn resolve_container_terminal() {
        let root = parse(SCHEMA).syntax();
        let address: Address = "container:invoice/container:order".parse().unwrap();
        assert_eq!(resolve(&root, &address).unwrap().text(), "Order");
    }

    #[test]
    fn non_identifier_token_yields_nothing() {
        let root = parse(SCHEMA).syntax();
        let brace = root
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::L_BRACE)
            .unwrap();
        assert!(compute_address(&brace).is_none());
    }
}
