use insta::assert_snapshot;
use ytt_schema::{
    AnySchema, DocumentSchema, NodePath, Schema, SchemaError, Type, ViolationKind,
    new_array_item_type, new_array_type, new_document_schema, new_map_item_type,
    type_from_exemplar,
};
use ytt_yamlmeta::{Array, ArrayItem, Document, Key, Map, MapItem, NodeRef, Position, Value};

fn at(line: usize) -> Position {
    Position::new("schema.yml", line)
}

fn data_at(line: usize) -> Position {
    Position::new("values.yml", line)
}

fn ab_schema() -> DocumentSchema {
    let doc = Document::new(
        Map::new()
            .at(at(1))
            .with_item(MapItem::new("a", "x").at(at(1)))
            .with_item(MapItem::new("b", 1_i64).at(at(2))),
    );
    new_document_schema(&doc).unwrap()
}

/// Test that a top-level map yields one field per entry, in order
#[test]
fn test_map_document_fields_follow_document_order() {
    let doc = Document::new(
        Map::new()
            .with_item(MapItem::new("zeta", "x"))
            .with_item(MapItem::new("alpha", true))
            .with_item(MapItem::new(
                "nested",
                Map::new().with_item(MapItem::new("inner", 1_i64)),
            ))
            .with_item(MapItem::new(
                "list",
                Array::new().with_item(ArrayItem::new("s")),
            )),
    );

    let schema = DocumentSchema::new(&doc).unwrap();
    let map_type = match &schema.allowed.value_type {
        Some(Type::Map(map_type)) => map_type,
        other => panic!("Expected map type, got {:?}", other),
    };

    let keys: Vec<String> = map_type.keys().map(Key::to_string).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "nested", "list"]);

    let kinds: Vec<&str> = map_type
        .items
        .iter()
        .map(|item| item.value_type.name())
        .collect();
    assert_eq!(kinds, vec!["string", "boolean", "map", "array"]);
}

/// Test that array exemplars need exactly one item
#[test]
fn test_array_exemplar_item_count() {
    for count in [0_usize, 2, 5] {
        let mut array = Array::new().at(at(3));
        for i in 0..count {
            array = array.with_item(ArrayItem::new(i as i64));
        }
        match new_array_type(&array) {
            Err(SchemaError::MalformedArrayExemplar { found, position }) => {
                assert_eq!(found, count);
                assert_eq!(position, at(3));
            }
            other => panic!("Expected count mismatch for {} items, got {:?}", count, other),
        }
    }

    let exemplar = Map::new().with_item(MapItem::new("host", "localhost"));
    let array = Array::new().with_item(ArrayItem::new(exemplar.clone()));
    let array_type = new_array_type(&array).unwrap();

    let expected = type_from_exemplar(&Value::Map(exemplar), &Position::unknown()).unwrap();
    assert_eq!(array_type.element_type(), &expected);
}

/// Test nullability and defaults of map items
#[test]
fn test_nullable_map_item_round_trip() {
    let nullable = MapItem::new("name", "x").annotated("schema/nullable");
    let item_type = new_map_item_type(&nullable).unwrap();
    assert!(item_type.is_nullable());
    assert_eq!(item_type.default_value, Value::Null);
    assert_eq!(item_type.value_type.name(), "string");

    let plain = MapItem::new("name", "x");
    let item_type = new_map_item_type(&plain).unwrap();
    assert!(!item_type.is_nullable());
    assert_eq!(item_type.default_value, Value::from("x"));

    let array = MapItem::new("names", Array::new().with_item(ArrayItem::new("x")));
    let item_type = new_map_item_type(&array).unwrap();
    assert!(!item_type.is_nullable());
    assert_eq!(item_type.default_value, Value::Array(Array::new()));
}

/// Test that nullable array items are rejected with a fixed message
#[test]
fn test_nullable_array_item_is_rejected() {
    let item = ArrayItem::new(Map::new().with_item(MapItem::new("a", 1_i64)))
        .at(at(8))
        .annotated("schema/nullable");

    let err = new_array_item_type(&item).unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"Array items cannot be annotated with #@schema/nullable (schema.yml:8). If this behaviour would be valuable, please submit an issue on https://github.com/vmware-tanzu/carvel-ytt"
    );

    // also when nested in a schema document
    let doc = Document::new(
        Map::new().with_item(MapItem::new("list", Array::new().with_item(item))),
    );
    assert_eq!(
        DocumentSchema::new(&doc).unwrap_err(),
        SchemaError::NullableArrayItem { position: at(8) }
    );
}

/// Test that a nullable map declares no fields
#[test]
fn test_nullable_map_has_no_fields() {
    let doc = Document::new(
        Map::new()
            .with_item(MapItem::new("a", "x"))
            .with_item(MapItem::new("b", 1_i64))
            .with_item(MapItem::new("c", true))
            .annotated("schema/nullable"),
    );

    let schema = DocumentSchema::new(&doc).unwrap();
    let map_type = schema.allowed.value_type.as_ref().and_then(Type::as_map).unwrap();
    assert!(map_type.items.is_empty());

    // an explicit null document value is accepted
    let data = Document::new(Value::Null);
    assert!(schema.assign_type(NodeRef::from(&data)).is_ok());
}

/// Test checking conforming data
#[test]
fn test_conforming_data_has_no_violations() {
    let schema = ab_schema();
    let data = Document::new(
        Map::new()
            .with_item(MapItem::new("a", "hello"))
            .with_item(MapItem::new("b", 5_i64)),
    );

    let result = schema.assign_type(NodeRef::from(&data));
    assert!(result.is_ok());
    assert!(result.violations().is_empty());
}

/// Test that an unknown key and a missing key are both reported
#[test]
fn test_unknown_and_missing_keys() {
    let schema = ab_schema();
    let data = Document::new(
        Map::new()
            .at(data_at(1))
            .with_item(MapItem::new("a", "hello").at(data_at(1)))
            .with_item(MapItem::new("c", 5_i64).at(data_at(2))),
    );

    let result = schema.assign_type(NodeRef::from(&data));
    assert!(!result.is_ok());

    let kinds: Vec<&ViolationKind> = result.violations().iter().map(|v| &v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &ViolationKind::UnknownKey {
                key: "c".to_string()
            },
            &ViolationKind::MissingKey {
                key: "b".to_string()
            },
        ]
    );

    let rendered: Vec<String> = result.violations().iter().map(ToString::to_string).collect();
    assert_snapshot!(rendered.join("\n"), @r"
    values.yml:2: Unexpected key 'c' (not declared in schema)
    values.yml:1: Missing required key 'b'
    ");
}

/// Test that the permissive schema accepts any node shape
#[test]
fn test_any_schema_accepts_everything() {
    let schema = AnySchema;

    let doc = Document::new(Value::from(1.5));
    let map = Map::new().with_item(MapItem::new("x", Value::Null));
    let array = Array::new();
    let item = MapItem::new(Key::Null, Value::Null);
    let array_item = ArrayItem::new(Array::new());

    let nodes = [
        NodeRef::from(&doc),
        NodeRef::from(&map),
        NodeRef::from(&array),
        NodeRef::from(&item),
        NodeRef::from(&array_item),
    ];
    for node in nodes {
        let result = schema.assign_type(node);
        assert!(result.is_ok());
        assert!(result.assignments().is_empty());
    }
}

/// Test that checking the same node twice gives the same result
#[test]
fn test_checking_is_idempotent() {
    let schema = ab_schema();
    let data = Document::new(
        Map::new()
            .with_item(MapItem::new("a", 3_i64))
            .with_item(MapItem::new("z", "x")),
    );

    let first = schema.assign_type(NodeRef::from(&data));
    let second = schema.assign_type(NodeRef::from(&data));
    assert_eq!(first.violations(), second.violations());
    assert_eq!(first.assignments(), second.assignments());
    assert_eq!(first.violations().len(), 3);
}

/// Test that one schema can check many documents concurrently
#[test]
fn test_schema_is_shared_across_threads() {
    let schema = ab_schema();
    let documents: Vec<Document> = (0..4_i64)
        .map(|n| {
            Document::new(
                Map::new()
                    .with_item(MapItem::new("a", "x"))
                    .with_item(MapItem::new("b", n)),
            )
        })
        .collect();

    let schema = &schema;
    std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .iter()
            .map(|doc| scope.spawn(move || schema.assign_type(NodeRef::from(doc)).is_ok()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

/// Test that resolved types are reported per path
#[test]
fn test_assigned_types_describe_data() {
    let schema_doc = Document::new(
        Map::new()
            .with_item(MapItem::new("replicas", 1_i64))
            .with_item(MapItem::new("image", "nginx").annotated("schema/nullable")),
    );
    let schema = DocumentSchema::new(&schema_doc).unwrap();
    let data = Document::new(
        Map::new()
            .with_item(MapItem::new("replicas", 3_i64))
            .with_item(MapItem::new("image", Value::Null)),
    );

    let result = schema.assign_type(NodeRef::from(&data));
    assert!(result.is_ok());

    let image = result
        .assignments()
        .get(&NodePath::root().key("image"))
        .unwrap();
    assert!(image.is_nullable());
    assert_eq!(image.default_value(), Some(&Value::Null));

    let replicas = result
        .assignments()
        .get(&NodePath::root().key("replicas"))
        .unwrap();
    assert_eq!(replicas.default_value(), Some(&Value::Int(1)));
}
