//! Parser tests - generated Go files.

use rstest::rstest;

use pbleap::parser::go::{SyntaxKind, parse};

fn parses_clean(input: &str) -> bool {
    parse(input).ok()
}

// ============================================================================
// Declarations
// ============================================================================

#[rstest]
#[case("package shopv1\n")]
#[case("import \"fmt\"\n")]
#[case("import protoreflect \"google.golang.org/protobuf/reflect/protoreflect\"\n")]
#[case("import (\n\t\"fmt\"\n\tsync \"sync\"\n)\n")]
#[case("type Status int32\n")]
#[case("type Empty struct {\n}\n")]
#[case("type Order struct {\n\tItemCount int32\n}\n")]
#[case("type Order struct {\n\tTags []string\n\tTotals map[string]int64\n}\n")]
#[case("type Order struct {\n\tMoney *Money `protobuf:\"bytes,1,opt,name=money\"`\n}\n")]
#[case("const Status_ACTIVE Status = 0\n")]
#[case("const (\n\tStatus_ACTIVE Status = 0\n\tStatus_INACTIVE Status = 1\n)\n")]
#[case("var File_model_proto protoreflect.FileDescriptor\n")]
#[case("func GetCount() int32 {\n\treturn 0\n}\n")]
#[case("func (x *Order) GetItemCount() int32 {\n\tif x != nil {\n\t\treturn x.ItemCount\n\t}\n\treturn 0\n}\n")]
fn test_declarations(#[case] input: &str) {
    assert!(parses_clean(input), "failed to parse: {input}");
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn struct_tags_stay_inside_field_decl() {
    let parsed = parse(
        "package m\n\ntype Order struct {\n\tItemCount int32 `protobuf:\"varint,1,opt,name=item_count\"`\n}\n",
    );
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let field = parsed
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::FIELD_DECL)
        .unwrap();
    let has_tag = field
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == SyntaxKind::RAW_STRING);
    assert!(has_tag);
}

#[test]
fn embedded_field_has_no_name_token() {
    let parsed = parse("package m\n\ntype Wrapper struct {\n\tprotoimpl.MessageState\n}\n");
    let field = parsed
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::FIELD_DECL)
        .unwrap();
    let direct_idents = field
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::IDENT)
        .count();
    assert_eq!(direct_idents, 0);
}

#[test]
fn raw_descriptor_blob_is_tolerated() {
    let input = "package m\n\nvar file_model_proto_rawDesc = []byte{\n\t0x0a, 0x0b, 0x6d,\n}\n\ntype Order struct {\n\tPaid bool\n}\n";
    let parsed = parse(input);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    assert!(
        parsed
            .syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::TYPE_SPEC)
    );
}

#[test]
fn lossless_round_trip() {
    let input = "package m\n\n// Status mirrors the schema enum.\ntype Status int32\n";
    let parsed = parse(input);
    assert_eq!(parsed.syntax().text().to_string(), input);
}
