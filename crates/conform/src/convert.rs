//! Conversion of bare literals into shapes.
//!
//! A bare array is a sequence template: its first element is the element
//! shape and the rest is ignored. A bare map is a record. Nested positions
//! stay literal and are lifted when the matcher reaches them.

use conform_value::{ObjectKey, Value, ValueKind};
use indexmap::IndexMap;

use crate::error::ShapeError;
use crate::shape::{RecordShape, Shape};

/// Lift a bare value into the shape it denotes.
pub fn to_shape(value: &Value) -> Result<Shape, ShapeError> {
    match value {
        Value::Array(template) => template
            .first()
            .map(|first| Shape::sequence(Shape::Literal(first.clone())))
            .ok_or(ShapeError::EmptySequenceTemplate),
        Value::Map(map) => Ok(Shape::Record(RecordShape::from_map(map))),
        other => Ok(Shape::Literal(other.clone())),
    }
}

/// Anything that can stand where a shape is expected.
pub trait IntoShape {
    fn into_shape(self) -> Result<Shape, ShapeError>;
}

impl IntoShape for Shape {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        Ok(self)
    }
}

impl IntoShape for ValueKind {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        Ok(Shape::Exact(self))
    }
}

impl IntoShape for Value {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        to_shape(&self)
    }
}

impl IntoShape for &Value {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        to_shape(self)
    }
}

impl IntoShape for serde_json::Value {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        to_shape(&Value::from(self))
    }
}

/// Bare sequence of shapes: the first one is the element shape.
impl IntoShape for Vec<Shape> {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        self.into_iter()
            .next()
            .map(Shape::sequence)
            .ok_or(ShapeError::EmptySequenceTemplate)
    }
}

/// Bare mapping of field name to shape.
impl<K: Into<ObjectKey>> IntoShape for Vec<(K, Shape)> {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        Ok(Shape::record(self))
    }
}

impl IntoShape for IndexMap<String, Shape> {
    fn into_shape(self) -> Result<Shape, ShapeError> {
        Ok(Shape::Record(RecordShape { fields: self }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_array_uses_first_element_as_template() {
        let shape = to_shape(&Value::from(json!([1, "ignored"]))).unwrap();
        assert_eq!(shape.to_string(), "Sequence[1]");
    }

    #[test]
    fn test_empty_array_is_rejected() {
        let err = to_shape(&Value::from(json!([]))).unwrap_err();
        assert!(matches!(err, ShapeError::EmptySequenceTemplate));
        let err = Vec::<Shape>::new().into_shape().unwrap_err();
        assert!(matches!(err, ShapeError::EmptySequenceTemplate));
    }

    #[test]
    fn test_map_becomes_record() {
        let shape = json!({"a": 1, "b": [true]}).into_shape().unwrap();
        assert_eq!(shape.to_string(), "Record{a: 1, b: [true]}");
    }

    #[test]
    fn test_scalar_becomes_literal() {
        let shape = Value::from("x").into_shape().unwrap();
        assert!(matches!(shape, Shape::Literal(Value::Text(ref s)) if s == "x"));
    }

    #[test]
    fn test_bare_shape_collections() {
        let sequence = vec![Shape::exact(ValueKind::Text), Shape::any()]
            .into_shape()
            .unwrap();
        assert_eq!(sequence.to_string(), "Sequence[text]");

        let record = vec![("id", Shape::exact(ValueKind::Integer))]
            .into_shape()
            .unwrap();
        assert_eq!(record.to_string(), "Record{id: integer}");
    }
}
