//! Coordinator tests: full position-to-partner-location requests.

use pbleap::{Navigator, PairingMap, Position};

const SCHEMA: &str = r#"syntax = "proto3";

message Order {
  int32 item_count = 1;
}

enum Status {
  ACTIVE = 0;
}
"#;

const GENERATED: &str = r#"package shopv1

type Status int32

const (
	Status_ACTIVE Status = 0
)

type Order struct {
	ItemCount int32 `protobuf:"varint,1,opt,name=item_count,json=itemCount,proto3" json:"item_count,omitempty"`
}
"#;

fn position_of(text: &str, needle: &str) -> Position {
    let offset = text.find(needle).unwrap_or_else(|| panic!("{needle} not in fixture"));
    let line = text[..offset].matches('\n').count();
    let column = offset - text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position::new(line, column)
}

fn navigator() -> Navigator {
    Navigator::new(
        [("model.proto", "model.pb.go")]
            .into_iter()
            .collect::<PairingMap>(),
    )
}

fn fetch(path: &str) -> Option<String> {
    match path {
        "model.proto" => Some(SCHEMA.to_string()),
        "model.pb.go" => Some(GENERATED.to_string()),
        _ => None,
    }
}

#[test]
fn schema_to_generated() {
    let result = navigator().goto_partner(
        "model.proto",
        SCHEMA,
        position_of(SCHEMA, "item_count"),
        fetch,
    );
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.path, "model.pb.go");
    assert_eq!(target.span.start, position_of(GENERATED, "ItemCount"));
}

#[test]
fn generated_to_schema() {
    let result = navigator().goto_partner(
        "model.pb.go",
        GENERATED,
        position_of(GENERATED, "Status_ACTIVE"),
        fetch,
    );
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.path, "model.proto");
    assert_eq!(target.span.start, position_of(SCHEMA, "ACTIVE"));
}

#[test]
fn cursor_on_punctuation_is_silent() {
    let result = navigator().goto_partner(
        "model.proto",
        SCHEMA,
        position_of(SCHEMA, "{"),
        fetch,
    );
    assert!(result.is_empty());
}

#[test]
fn missing_pairing_is_silent() {
    let navigator = Navigator::new(PairingMap::new());
    let result = navigator.goto_partner(
        "model.proto",
        SCHEMA,
        position_of(SCHEMA, "item_count"),
        fetch,
    );
    assert!(result.is_empty());
}

#[test]
fn unreadable_partner_is_silent() {
    let result = navigator().goto_partner(
        "model.proto",
        SCHEMA,
        position_of(SCHEMA, "item_count"),
        |_| None,
    );
    assert!(result.is_empty());
}

#[test]
fn unknown_extension_is_silent() {
    let result = navigator().goto_partner(
        "README.md",
        "# readme",
        Position::new(0, 2),
        fetch,
    );
    assert!(result.is_empty());
}

#[test]
fn unresolvable_address_is_silent() {
    // schema field with no counterpart in the generated fixture
    let schema = "message Receipt {\n  bool printed = 1;\n}\n";
    let navigator = Navigator::new(
        [("receipt.proto", "model.pb.go")]
            .into_iter()
            .collect::<PairingMap>(),
    );
    let result = navigator.goto_partner(
        "receipt.proto",
        schema,
        position_of(schema, "printed"),
        fetch,
    );
    assert!(result.is_empty());
}
