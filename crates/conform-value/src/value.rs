use core::fmt;

use indexmap::IndexMap;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::prelude_internal::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    Array,
    Map,
    /// Kind of an opaque host value, identified by its class name.
    Class(String),
}

impl ValueKind {
    /// Whether this kind denotes the absent-or-null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Array => write!(f, "array"),
            Self::Map => write!(f, "map"),
            Self::Class(name) => write!(f, "{name}"),
        }
    }
}

/// A dynamically-typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    Text(String),
    Array(Array),
    Map(Map),
    /// Host-specific value compared only by class and equality.
    Opaque(Opaque),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
            Self::Opaque(o) => ValueKind::Class(o.class.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        if let Self::Map(m) = self {
            Some(m)
        } else {
            None
        }
    }
}

/// Numbers compare across `Integer` and `Float`, so `1 == 1.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(x)) | (Self::Float(x), Self::Integer(i)) => {
                integer_equals_float(i, *x)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

fn integer_equals_float(i: &BigInt, x: f64) -> bool {
    if !x.is_finite() || x.fract() != 0.0 {
        return false;
    }
    match i.to_f64() {
        Some(f) if f == x => BigInt::from_f64(x).is_some_and(|n| &n == i),
        _ => false,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Array(a) => write!(f, "{a}"),
            Self::Map(m) => write!(f, "{m}"),
            Self::Opaque(o) => write!(f, "{o}"),
        }
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Map key.
///
/// Keys of different types can denote the same field: a record declaring
/// `"1"` accepts both `ObjectKey::String("1")` and `ObjectKey::Number(1)`.
/// Record matching compares keys through [`ObjectKey::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKey {
    String(String),
    Number(BigInt),
    Bool(bool),
}

impl ObjectKey {
    /// Canonical string form of this key.
    pub fn normalized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKey::String(s) => write!(f, "{s}"),
            ObjectKey::Number(n) => write!(f, "{n}"),
            ObjectKey::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ObjectKey {
    fn from(s: &str) -> Self {
        ObjectKey::String(s.to_string())
    }
}

impl From<String> for ObjectKey {
    fn from(s: String) -> Self {
        ObjectKey::String(s)
    }
}

impl From<bool> for ObjectKey {
    fn from(b: bool) -> Self {
        ObjectKey::Bool(b)
    }
}

impl From<i64> for ObjectKey {
    fn from(n: i64) -> Self {
        ObjectKey::Number(BigInt::from(n))
    }
}

impl From<BigInt> for ObjectKey {
    fn from(n: BigInt) -> Self {
        ObjectKey::Number(n)
    }
}

// =============================================================================
// Containers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, from_iter, new)]
pub struct Array(pub Vec<Value>);

impl Array {
    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

/// Insertion-ordered map. Equality ignores order.
#[derive(Debug, Clone, PartialEq, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct Map(pub IndexMap<ObjectKey, Value>);

impl Map {
    pub fn get(&self, key: &ObjectKey) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: ObjectKey, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    pub fn contains_key(&self, key: &ObjectKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ObjectKey> {
        self.0.keys()
    }
}

impl<K: Into<ObjectKey>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            match key {
                ObjectKey::String(s) => write!(f, "{s:?}: {value}")?,
                other => write!(f, "{other}: {value}")?,
            }
        }
        write!(f, "}}")
    }
}

/// Opaque host value: a class name plus a textual representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opaque {
    pub class: String,
    pub repr: String,
}

impl Opaque {
    pub fn new(class: impl Into<String>, repr: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            repr: repr.into(),
        }
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{} {}>", self.class, self.repr)
    }
}

// ============================================================================
// From implementations for Value
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array(items))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_equals_float() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from(1.0), Value::from(1));
        assert_ne!(Value::from(1), Value::from(1.5));
        assert_ne!(Value::from(1), Value::from(f64::NAN));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a: Map = [("a", 1), ("b", 2)].into_iter().collect();
        let b: Map = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn test_display_inspect_style() {
        let map: Map = [("a", Value::from(vec![Value::from(1), Value::from("x")]))]
            .into_iter()
            .collect();
        assert_eq!(Value::Map(map).to_string(), r#"{"a": [1, "x"]}"#);
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
        assert_eq!(Value::from(Opaque::new("Date", "2024-01-01")).to_string(), "#<Date 2024-01-01>");
    }

    #[test]
    fn test_key_normalization_unifies_key_types() {
        assert_eq!(ObjectKey::from("1").normalized(), ObjectKey::from(1i64).normalized());
        assert_eq!(ObjectKey::from(true).normalized(), "true");
    }

    #[test]
    fn test_kind_of_opaque_is_its_class() {
        let v = Value::from(Opaque::new("Date", "today"));
        assert_eq!(v.kind(), ValueKind::Class("Date".to_string()));
        assert_eq!(v.kind().to_string(), "Date");
    }
}
