//! Address computation and resolution over the generated-Go CST.
//!
//! Generated code flattens nesting into identifier text: a nested message
//! becomes `Invoice_Order`, an enum member becomes `Status_ACTIVE` typed
//! as its alias `Status`. This walker translates between that flattened
//! convention and the canonical address form.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::names::{flattened_to_canonical, longest_common_prefix, to_pascal, to_snake};
use crate::parser::go::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::syntax::AstNode;
use crate::syntax::go::{ConstSpec, SourceFile, TypeSpec};

use super::address::{Address, Target};

/// Compute the canonical address of an identifier token, or `None` when
/// the token is not a declared name the engine recognizes.
pub fn compute_address(token: &SyntaxToken) -> Option<Address> {
    if token.kind() != SyntaxKind::IDENT {
        return None;
    }
    let parent = token.parent()?;
    match parent.kind() {
        SyntaxKind::TYPE_SPEC => {
            let spec = TypeSpec::cast(parent)?;
            if spec.is_struct() {
                Some(struct_address(token.text()))
            } else {
                // declaration-only enum alias: no member to disambiguate
                // the split, so the chain is a best-effort guess
                Some(alias_address(token.text()))
            }
        }
        SyntaxKind::FIELD_DECL => {
            let spec = parent
                .ancestors()
                .find(|n| n.kind() == SyntaxKind::TYPE_SPEC)
                .and_then(TypeSpec::cast)?;
            let containers = segments(spec.name()?.text());
            Some(Address::new(
                containers,
                Target::Field(to_snake(token.text()).into()),
            ))
        }
        SyntaxKind::CONST_SPEC => {
            let spec = ConstSpec::cast(parent)?;
            deduce_enum(spec.type_name()?.text(), spec.name()?.text())
        }
        // the alias identifier inside a const spec's type position also
        // names the member's enum, so give it the same address
        SyntaxKind::TYPE_EXPR => {
            let spec = ConstSpec::cast(parent.parent()?)?;
            deduce_enum(spec.type_name()?.text(), spec.name()?.text())
        }
        _ => None,
    }
}

/// Resolve an address against a parsed generated file, returning the
/// declared-name token of the matched entity.
pub fn resolve(root: &SyntaxNode, address: &Address) -> Option<SyntaxToken> {
    let file = SourceFile::cast(root.clone())?;
    let specs: FxHashMap<SmolStr, TypeSpec> = file
        .type_specs()
        .filter_map(|s| s.name().map(|t| (SmolStr::new(t.text()), s)))
        .collect();

    let prefix = address
        .containers()
        .iter()
        .map(|name| to_pascal(name))
        .collect::<Vec<_>>()
        .join("_");

    match address.target() {
        Target::Container(name) => {
            let spec = specs.get(flattened(&prefix, name).as_str())?;
            if !spec.is_struct() {
                return None;
            }
            spec.name()
        }
        Target::Field(name) => {
            let spec = specs.get(prefix.as_str())?;
            let member = to_pascal(name);
            spec.struct_type()?
                .fields()
                .find(|f| {
                    f.name()
                        .is_some_and(|t| t.text().eq_ignore_ascii_case(&member))
                })?
                .name()
        }
        Target::Enum(name) => {
            let spec = specs.get(flattened(&prefix, name).as_str())?;
            if spec.is_struct() {
                return None;
            }
            spec.name()
        }
        Target::EnumMember {
            enumeration,
            member,
        } => {
            let alias = flattened(&prefix, enumeration);
            let candidate = format!("{alias}_{member}");
            file.const_specs()
                .find(|spec| {
                    spec.type_name().is_some_and(|t| t.text() == alias)
                        && spec
                            .name()
                            .is_some_and(|t| t.text().eq_ignore_ascii_case(&candidate))
                })?
                .name()
        }
    }
}

/// All segments of a flattened struct name become container steps.
fn struct_address(declared: &str) -> Address {
    let mut containers = segments(declared);
    let leaf = containers.pop().unwrap_or_else(|| declared.into());
    Address::new(containers, Target::Container(leaf))
}

/// Declaration-only alias: split on `_`, leading segments guessed as the
/// container chain, final segment as the enum's own name.
fn alias_address(declared: &str) -> Address {
    let mut containers = segments(declared);
    let leaf = containers.pop().unwrap_or_else(|| declared.into());
    Address::new(containers, Target::Enum(leaf))
}

/// Containment deduction for a const spec pairing a member identifier with
/// its backing alias type. With both names available the split is exact:
/// the shared segment prefix separates chain from local names.
fn deduce_enum(type_name: &str, const_name: &str) -> Option<Address> {
    let prefix = longest_common_prefix(type_name, const_name);
    let member: SmolStr = strip_segments(const_name, &prefix)?.to_ascii_lowercase().into();
    if prefix == type_name {
        // member extends the full type name, so the type name is the
        // enum's whole (possibly flattened) name
        Some(Address::new(
            Vec::new(),
            Target::EnumMember {
                enumeration: flattened_to_canonical(type_name).into(),
                member,
            },
        ))
    } else {
        let containers = if prefix.is_empty() {
            Vec::new()
        } else {
            segments(&prefix)
        };
        let local = strip_segments(type_name, &prefix)?;
        Some(Address::new(
            containers,
            Target::EnumMember {
                enumeration: flattened_to_canonical(local).into(),
                member,
            },
        ))
    }
}

fn segments(flattened: &str) -> Vec<SmolStr> {
    flattened
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|s| SmolStr::new(to_snake(s)))
        .collect()
}

fn flattened(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        to_pascal(name)
    } else {
        format!("{prefix}_{}", to_pascal(name))
    }
}

fn strip_segments<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        Some(name)
    } else {
        name.strip_prefix(prefix)?.strip_prefix('_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::go::parse;

    const GENERATED: &str = r#"
package model

type Status int32

const (
	Status_ACTIVE   Status = 0
	Status_INACTIVE Status = 1
)

type Account_Kind int32

const (
	Account_Kind_PERSONAL Account_Kind = 0
)

type Invoice struct {
	Total int64 `protobuf:"varint,1,opt,name=total,proto3" json:"total,omitempty"`
}

type Invoice_Order struct {
	ItemCount int32 `protobuf:"varint,1,opt,name=item_count,json=itemCount,proto3" json:"item_count,omitempty"`
}
"#;

    fn ident_with_parent(root: &SyntaxNode, text: &str, parent: SyntaxKind) -> SyntaxToken {
        root.descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| {
                t.kind() == SyntaxKind::IDENT
                    && t.text() == text
                    && t.parent().is_some_and(|p| p.kind() == parent)
            })
            .unwrap()
    }

    #[test]
    fn field_address_splits_flattened_struct_name() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "ItemCount", SyntaxKind::FIELD_DECL);
        let address = compute_address(&token).unwrap();
        assert_eq!(
            address.to_string(),
            "container:invoice/container:order/field:item_count"
        );
    }

    #[test]
    fn struct_name_address() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "Invoice_Order", SyntaxKind::TYPE_SPEC);
        let address = compute_address(&token).unwrap();
        assert_eq!(address.to_string(), "container:invoice/container:order");
    }

    #[test]
    fn alias_declaration_address_is_best_effort() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "Status", SyntaxKind::TYPE_SPEC);
        let address = compute_address(&token).unwrap();
        assert_eq!(address.to_string(), "enum:status");
    }

    #[test]
    fn const_spec_deduces_top_level_enum() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "Status_ACTIVE", SyntaxKind::CONST_SPEC);
        let address = compute_address(&token).unwrap();
        assert_eq!(address.to_string(), "enum:status/enum_member:active");
    }

    #[test]
    fn const_type_identifier_gets_member_address() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "Status", SyntaxKind::TYPE_EXPR);
        let address = compute_address(&token).unwrap();
        assert_eq!(address.to_string(), "enum:status/enum_member:active");
    }

    #[test]
    fn nested_enum_member_deduction_keeps_flattened_name() {
        let root = parse(GENERATED).syntax();
        let token = ident_with_parent(&root, "Account_Kind_PERSONAL", SyntaxKind::CONST_SPEC);
        let address = compute_address(&token).unwrap();
        // without a second data point the chain cannot be recovered
        assert_eq!(
            address.to_string(),
            "enum:account_kind/enum_member:personal"
        );
    }

    #[test]
    fn resolve_field_capitalizes() {
        let root = parse(GENERATED).syntax();
        let address: Address = "container:invoice/container:order/field:item_count"
            .parse()
            .unwrap();
        assert_eq!(resolve(&root, &address).unwrap().text(), "ItemCount");
    }

    #[test]
    fn resolve_container_terminal() {
        let root = parse(GENERATED).syntax();
        let address: Address = "container:invoice/container:order".parse().unwrap();
        assert_eq!(resolve(&root, &address).unwrap().text(), "Invoice_Order");
    }

    #[test]
    fn resolve_enum_member_is_case_insensitive() {
        let root = parse(GENERATED).syntax();
        let address: Address = "enum:status/enum_member:active".parse().unwrap();
        assert_eq!(resolve(&root, &address).unwrap().text(), "Status_ACTIVE");
    }

    #[test]
    fn resolve_nested_enum_member_through_containers() {
        let root = parse(GENERATED).syntax();
        let address: Address = "container:account/enum:kind/enum_member:personal"
            .parse()
            .unwrap();
        assert_eq!(
            resolve(&root, &address).unwrap().text(),
            "Account_Kind_PERSONAL"
        );
    }

    #[test]
    fn resolve_enum_terminal_finds_alias() {
        let root = parse(GENERATED).syntax();
        let address: Address = "enum:status".parse().unwrap();
        let token = resolve(&root, &address).unwrap();
        assert_eq!(token.text(), "Status");
        assert_eq!(token.parent().unwrap().kind(), SyntaxKind::TYPE_SPEC);
    }

    #[test]
    fn resolve_missing_struct_yields_nothing() {
        let root = parse(GENERATED).syntax();
        let address: Address = "container:receipt/field:total".parse().unwrap();
        assert!(resolve(&root, &address).is_none());
    }
}
