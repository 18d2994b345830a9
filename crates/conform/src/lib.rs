//! Runtime structural shape matching.
//!
//! Build a [`Shape`] once, then match any number of [`Value`]s against it.
//! [`matches`] answers yes or no; [`validate`] also returns an [`ErrorTree`]
//! with every mismatch keyed by the path where it occurred.
//!
//! ```
//! use conform::{Shape, Value, ValueKind};
//! use serde_json::json;
//!
//! let shape = Shape::record([
//!     ("id", Shape::exact(ValueKind::Integer)),
//!     ("tags", Shape::sequence(ValueKind::Text)),
//! ]);
//!
//! let output = shape.validate(&Value::from(json!({"id": "1", "tags": ["x", 2]}))).unwrap();
//! assert!(!output.is_valid);
//! assert_eq!(output.errors.flatten().len(), 2);
//! ```

mod error;

pub mod assert;
pub mod convert;
pub mod options;
pub mod report;
pub mod shape;
pub mod validate;

pub use conform_value::{Map, ObjectKey, Opaque, PathSegment, Value, ValueKind, ValuePath};
pub use convert::{IntoShape, to_shape};
pub use error::ShapeError;
pub use options::MatchOptions;
pub use report::{ErrorNode, ErrorTree};
pub use shape::{Pattern, PatternMode, RecordShape, Shape};
pub use validate::{
    MatchContext, Mismatch, ValidationOutput, ValidatorError, matches, matches_with, validate,
    validate_with,
};
