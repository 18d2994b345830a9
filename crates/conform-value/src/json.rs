use num_bigint::BigInt;

use crate::value::{Array, Map, ObjectKey, Value};

/// JSON numbers that fit `i64` or `u64` become `Integer`, all others `Float`.
/// Object key order is preserved.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect::<Array>())
            }
            serde_json::Value::Object(object) => Value::Map(Map(object
                .into_iter()
                .map(|(k, v)| (ObjectKey::String(k), Value::from(v)))
                .collect())),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(BigInt::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Integer(BigInt::from(u))
    } else {
        // as_f64 only fails under arbitrary_precision, which is not enabled
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
