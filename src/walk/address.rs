//! The canonical, artifact-independent address of a schema entity.
//!
//! An address is an ordered path of enclosing containers plus a terminal
//! target. The shape rules (only containers may enclose, an enum_member is
//! always preceded by its enum, field and enum_member always terminate)
//! are carried by the types rather than checked at runtime.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// What the terminal step of an address points at.
#[derive(Debug, Clone)]
pub enum Target {
    /// The container itself is selected, not one of its members.
    Container(SmolStr),
    Field(SmolStr),
    Enum(SmolStr),
    /// A member of an enumeration; the enumeration name rides along so the
    /// pair always travels together.
    EnumMember { enumeration: SmolStr, member: SmolStr },
}

/// A canonical address: enclosing containers outermost-first, then the
/// target entity. All names use the word-delimited lower-case convention.
#[derive(Debug, Clone)]
pub struct Address {
    containers: Vec<SmolStr>,
    target: Target,
}

/// One step of an address, as viewed through [`Address::steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub kind: StepKind,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Container,
    Field,
    Enum,
    EnumMember,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Field => "field",
            Self::Enum => "enum",
            Self::EnumMember => "enum_member",
        }
    }
}

impl Address {
    pub fn new(containers: Vec<SmolStr>, target: Target) -> Self {
        Self { containers, target }
    }

    /// Enclosing container names, outermost first. Does not include a
    /// terminal [`Target::Container`].
    pub fn containers(&self) -> &[SmolStr] {
        &self.containers
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The address as a flat step sequence; an enum member contributes its
    /// enum step followed by the member step.
    pub fn steps(&self) -> Vec<Step<'_>> {
        let mut steps: Vec<Step<'_>> = self
            .containers
            .iter()
            .map(|name| Step {
                kind: StepKind::Container,
                name,
            })
            .collect();
        match &self.target {
            Target::Container(name) => steps.push(Step {
                kind: StepKind::Container,
                name,
            }),
            Target::Field(name) => steps.push(Step {
                kind: StepKind::Field,
                name,
            }),
            Target::Enum(name) => steps.push(Step {
                kind: StepKind::Enum,
                name,
            }),
            Target::EnumMember {
                enumeration,
                member,
            } => {
                steps.push(Step {
                    kind: StepKind::Enum,
                    name: enumeration,
                });
                steps.push(Step {
                    kind: StepKind::EnumMember,
                    name: member,
                });
            }
        }
        steps
    }
}

impl PartialEq for Address {
    /// Member names compare case-insensitively to tolerate generator
    /// capitalization drift; everything else compares exactly.
    fn eq(&self, other: &Self) -> bool {
        if self.containers != other.containers {
            return false;
        }
        match (&self.target, &other.target) {
            (Target::Container(a), Target::Container(b)) => a == b,
            (Target::Enum(a), Target::Enum(b)) => a == b,
            (Target::Field(a), Target::Field(b)) => a.eq_ignore_ascii_case(b),
            (
                Target::EnumMember {
                    enumeration: ea,
                    member: ma,
                },
                Target::EnumMember {
                    enumeration: eb,
                    member: mb,
                },
            ) => ea == eb && ma.eq_ignore_ascii_case(mb),
            _ => false,
        }
    }
}

impl Eq for Address {}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}:{}", step.kind.as_str(), step.name)?;
        }
        Ok(())
    }
}

/// Errors produced when parsing the textual `kind:name/...` form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address is empty")]
    Empty,
    #[error("malformed step `{0}`: expected `kind:name`")]
    MalformedStep(String),
    #[error("unknown step kind `{0}`")]
    UnknownKind(String),
    #[error("`{0}` step must be terminal")]
    NonTerminal(String),
    #[error("enum_member step must directly follow an enum step")]
    UnpairedMember,
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed: Vec<(StepKind, SmolStr)> = Vec::new();
        for part in s.split('/').filter(|p| !p.is_empty()) {
            let (kind, name) = part
                .split_once(':')
                .ok_or_else(|| AddressParseError::MalformedStep(part.to_string()))?;
            if name.is_empty() {
                return Err(AddressParseError::MalformedStep(part.to_string()));
            }
            let kind = match kind {
                "container" => StepKind::Container,
                "field" => StepKind::Field,
                "enum" => StepKind::Enum,
                "enum_member" => StepKind::EnumMember,
                other => return Err(AddressParseError::UnknownKind(other.to_string())),
            };
            parsed.push((kind, SmolStr::new(name)));
        }

        let (last_kind, last_name) = parsed.pop().ok_or(AddressParseError::Empty)?;
        let target = match last_kind {
            StepKind::Container => Target::Container(last_name),
            StepKind::Field => Target::Field(last_name),
            StepKind::Enum => Target::Enum(last_name),
            StepKind::EnumMember => {
                let (prev_kind, prev_name) = parsed.pop().ok_or(AddressParseError::UnpairedMember)?;
                if prev_kind != StepKind::Enum {
                    return Err(AddressParseError::UnpairedMember);
                }
                Target::EnumMember {
                    enumeration: prev_name,
                    member: last_name,
                }
            }
        };

        let mut containers = Vec::with_capacity(parsed.len());
        for (kind, name) in parsed {
            if kind != StepKind::Container {
                return Err(AddressParseError::NonTerminal(kind.as_str().to_string()));
            }
            containers.push(name);
        }

        Ok(Address::new(containers, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn steps_expand_enum_member_pair() {
        let address = Address::new(
            vec!["invoice".into()],
            Target::EnumMember {
                enumeration: "status".into(),
                member: "active".into(),
            },
        );
        let kinds: Vec<_> = address.steps().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Container, StepKind::Enum, StepKind::EnumMember]
        );
        assert_eq!(
            address.to_string(),
            "container:invoice/enum:status/enum_member:active"
        );
    }

    #[test]
    fn display_from_str_round_trip() {
        let text = "container:invoice/container:order/field:item_count";
        let address: Address = text.parse().unwrap();
        assert_eq!(address.containers().len(), 2);
        assert_eq!(address.to_string(), text);
    }

    #[test]
    fn member_comparison_ignores_case() {
        let a = Address::new(
            Vec::new(),
            Target::EnumMember {
                enumeration: "status".into(),
                member: "ACTIVE".into(),
            },
        );
        let b = Address::new(
            Vec::new(),
            Target::EnumMember {
                enumeration: "status".into(),
                member: "active".into(),
            },
        );
        assert_eq!(a, b);
    }

    #[rstest]
    #[case("", AddressParseError::Empty)]
    #[case("field:a/container:b", AddressParseError::NonTerminal("field".into()))]
    #[case("container:a/enum_member:b", AddressParseError::UnpairedMember)]
    #[case("enum_member:b", AddressParseError::UnpairedMember)]
    #[case("widget:a", AddressParseError::UnknownKind("widget".into()))]
    #[case("container", AddressParseError::MalformedStep("container".into()))]
    fn rejects_malformed(#[case] input: &str, #[case] expected: AddressParseError) {
        assert_eq!(input.parse::<Address>().unwrap_err(), expected);
    }
}
