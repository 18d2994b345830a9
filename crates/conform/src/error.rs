//! Error types for shape construction

use conform_value::ValueKind;
use thiserror::Error;

/// Errors raised while building a shape.
///
/// These indicate a malformed shape description, not a problem with any
/// value being matched.
#[derive(Debug, Clone, Error)]
pub enum ShapeError {
    /// Record fields were given as something other than a mapping
    #[error("record fields must be a mapping of field name to shape, got {actual}")]
    RecordFieldsNotMapping { actual: ValueKind },

    /// Pattern source is not a valid regular expression
    #[error("invalid pattern /{pattern}/: {error}")]
    InvalidPattern {
        pattern: String,
        #[source]
        error: regex::Error,
    },

    /// `Optional` around a shape that already accepts null
    #[error("optional shape around {inner} is redundant: it already accepts null")]
    RedundantOptional { inner: String },

    /// A bare sequence used as a shape has no first element to act as template
    #[error("sequence template is empty: its first element is the element shape")]
    EmptySequenceTemplate,
}
