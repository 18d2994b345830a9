//! Value model for conform.
//!
//! A minimal dynamically-typed value universe: null, booleans, numbers,
//! text, ordered arrays, insertion-ordered maps and opaque host values.
//! Shapes in the `conform` crate are matched against these values.

/// The dynamically-typed value and its key/kind types.
pub mod value;

/// Paths locating a position inside a value.
pub mod path;

/// Conversion from `serde_json` values.
pub mod json;

pub use path::{PathSegment, ValuePath};
pub use value::{Array, Map, ObjectKey, Opaque, Value, ValueKind};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::path::{PathSegment, ValuePath};
    pub use crate::value::{Array, Map, ObjectKey, Opaque, Value, ValueKind};
    pub use num_bigint::BigInt;
    pub use thisisplural::Plural;
}
