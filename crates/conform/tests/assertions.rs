use conform::assert::{Verdict, check};
use conform::{Shape, Value, ValueKind, assert_not_shape, assert_shape};
use serde_json::json;

#[test]
fn test_assert_shape_accepts_bare_literals() {
    assert_shape!(json!({"id": 1, "tags": ["a"]}), json!({"id": 1, "tags": ["a"]}));
    assert_shape!(json!([1, 2, 3]), vec![Shape::exact(ValueKind::Integer)]);
    assert_shape!(
        json!({"id": 7}),
        vec![("id", Shape::exact(ValueKind::Integer))],
    );
}

#[test]
fn test_assert_not_shape_on_soft_mismatch() {
    assert_not_shape!(json!({"id": "7"}), vec![("id", Shape::exact(ValueKind::Integer))]);
    assert_not_shape!(Value::Null, ValueKind::Text);
}

#[test]
#[should_panic(expected = r#"expected {"id": "7"} to match Record{id: integer}"#)]
fn test_assert_shape_panics_with_report() {
    assert_shape!(json!({"id": "7"}), vec![("id", Shape::exact(ValueKind::Integer))]);
}

#[test]
#[should_panic(expected = "cannot match 5 against Pattern(/a/)")]
fn test_assert_not_shape_rejects_contract_violation() {
    assert_not_shape!(5, Shape::pattern("a").unwrap());
}

#[test]
fn test_check_verdicts() {
    let matched = check(&Value::from(1), ValueKind::Integer);
    assert_eq!(matched.verdict, Verdict::Matched);
    assert!(matched.passed());

    let mismatched = check(&Value::from("x"), ValueKind::Integer);
    assert_eq!(mismatched.verdict, Verdict::Mismatched);
    assert!(mismatched.message.contains("is not instance of integer"));

    let invalid = check(&Value::from(1), Vec::<Shape>::new());
    assert_eq!(invalid.verdict, Verdict::ContractViolation);
    assert!(invalid.message.starts_with("invalid shape:"));
}
