use conform_value::{ObjectKey, Value, ValueKind};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_scalars_convert() {
    assert_eq!(Value::from(json!(null)), Value::Null);
    assert_eq!(Value::from(json!(true)), Value::Bool(true));
    assert_eq!(Value::from(json!(42)), Value::Integer(BigInt::from(42)));
    assert_eq!(Value::from(json!(u64::MAX)).kind(), ValueKind::Integer);
    assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
    assert_eq!(Value::from(json!("x")), Value::Text("x".to_string()));
}

#[test]
fn test_object_preserves_key_order() {
    let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
    let map = value.as_map().expect("object converts to map");
    let keys: Vec<String> = map.keys().map(ObjectKey::normalized).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_nested_structure_converts() {
    let value = Value::from(&json!({"id": 1, "tags": ["x", "y"]}));
    let map = value.as_map().expect("map");
    let tags = map
        .get(&ObjectKey::from("tags"))
        .and_then(Value::as_array)
        .expect("tags array");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags.first(), Some(&Value::from("x")));
    assert_eq!(value.to_string(), r#"{"id": 1, "tags": ["x", "y"]}"#);
}
