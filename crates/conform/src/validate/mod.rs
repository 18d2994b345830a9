//! Shape matching
//!
//! # Architecture
//!
//! Matching is a recursive descent over the shape and the value together:
//! - `ShapeValidator`: Dispatches to a per-variant validator
//! - Variant validators: Implement `Validator`, recursing through `ShapeValidator`
//! - `MatchContext`: Holds the path stack and the error tree
//!
//! Every validator visits all of its children, so one pass reports every
//! independent mismatch. A validator returns `Ok(false)` only after recording
//! at least one error, and never records an error when returning `Ok(true)`.
//!
//! # Error Handling
//!
//! Two categories of errors:
//! - `Mismatch`: Recorded in the error tree, matching continues
//! - `ValidatorError`: Contract violations returned as `Err`, aborting the match

mod compound;
mod context;
mod error;
mod primitive;
mod record;
mod union;

pub use context::{MatchContext, MatchState, ValidationOutput};
pub use error::{Mismatch, RejectedAlternatives, ValidatorError};

use core::fmt;

use conform_value::Value;

use crate::options::MatchOptions;
use crate::shape::Shape;

use compound::SequenceValidator;
use primitive::{
    AnyValidator, ExactValidator, LiteralValidator, NothingValidator, PatternValidator,
};
use record::{RecordFields, RecordValidator};
use union::UnionValidator;

// =============================================================================
// Public API
// =============================================================================

/// Match a value against a shape, keeping diagnostics.
///
/// # Example
///
/// ```
/// use conform::{Shape, Value, ValueKind, validate};
///
/// let shape = Shape::record([("id", Shape::exact(ValueKind::Integer))]);
/// let output = validate(&shape, &Value::from(serde_json::json!({"id": "1"}))).unwrap();
/// assert!(!output.is_valid);
/// println!("{}", output.message);
/// ```
pub fn validate(shape: &Shape, value: &Value) -> Result<ValidationOutput, ValidatorError> {
    validate_with(shape, value, &MatchOptions::default())
}

/// Like [`validate`] with explicit options.
pub fn validate_with(
    shape: &Shape,
    value: &Value,
    options: &MatchOptions,
) -> Result<ValidationOutput, ValidatorError> {
    let _span = tracing::trace_span!("validate", %shape).entered();

    let ctx = MatchContext::new(options);
    let is_valid = match_in(shape, value, &ctx)?;
    let output = ctx.finish();
    debug_assert_eq!(is_valid, output.is_valid);

    tracing::debug!(
        valid = output.is_valid,
        error_nodes = output.errors.node_count(),
        "validation finished"
    );
    Ok(output)
}

/// Match a value against a shape, discarding diagnostics.
pub fn matches(shape: &Shape, value: &Value) -> Result<bool, ValidatorError> {
    matches_with(shape, value, &MatchOptions::default())
}

pub fn matches_with(
    shape: &Shape,
    value: &Value,
    options: &MatchOptions,
) -> Result<bool, ValidatorError> {
    Ok(validate_with(shape, value, options)?.is_valid)
}

/// Match within an existing context, recording at its current path.
pub fn match_in(shape: &Shape, value: &Value, ctx: &MatchContext<'_>) -> Result<bool, ValidatorError> {
    let mut validator = ShapeValidator {
        ctx,
        shape: ShapeRef::Shape(shape),
    };
    validator.validate(value)
}

// =============================================================================
// Validator trait and shape references
// =============================================================================

/// One step of the recursive match.
pub(crate) trait Validator {
    /// `Ok(false)` is a soft mismatch already recorded in the context.
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError>;
}

/// A shape position: either a shape node or a bare literal.
///
/// Bare arrays and maps are lifted into sequence and record matching when
/// they are reached, so they never need to be converted up front.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ShapeRef<'s> {
    Shape(&'s Shape),
    Literal(&'s Value),
}

/// Shape behind `Optional`'s second alternative.
static NULL_SHAPE: Shape = Shape::Exact(conform_value::ValueKind::Null);

impl ShapeRef<'_> {
    pub(crate) fn is_required(self) -> bool {
        match self {
            ShapeRef::Shape(shape) => shape.is_required(),
            ShapeRef::Literal(_) => true,
        }
    }
}

impl fmt::Display for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeRef::Shape(shape) => write!(f, "{shape}"),
            ShapeRef::Literal(value) => write!(f, "{value}"),
        }
    }
}

// =============================================================================
// ShapeValidator (main dispatcher)
// =============================================================================

/// Main validator that dispatches to variant validators.
pub(crate) struct ShapeValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub shape: ShapeRef<'s>,
}

impl Validator for ShapeValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        let ctx = self.ctx;
        match self.shape {
            ShapeRef::Literal(Value::Array(template)) => {
                let Some(element) = template.first() else {
                    return Err(ValidatorError::EmptySequenceTemplate { path: ctx.path() });
                };
                SequenceValidator {
                    ctx,
                    element: ShapeRef::Literal(element),
                }
                .validate(value)
            }
            ShapeRef::Literal(Value::Map(fields)) => RecordValidator {
                ctx,
                fields: RecordFields::Bare(fields),
            }
            .validate(value),
            ShapeRef::Literal(expected) => LiteralValidator { ctx, expected }.validate(value),
            ShapeRef::Shape(shape) => match shape {
                Shape::Exact(kind) => ExactValidator { ctx, kind }.validate(value),
                Shape::Sequence(element) => SequenceValidator {
                    ctx,
                    element: ShapeRef::Shape(element),
                }
                .validate(value),
                Shape::Record(record) => RecordValidator {
                    ctx,
                    fields: RecordFields::Declared(&record.fields),
                }
                .validate(value),
                Shape::Union(alternatives) => UnionValidator {
                    ctx,
                    alternatives: alternatives.iter().map(ShapeRef::Shape).collect(),
                }
                .validate(value),
                Shape::Optional(inner) => UnionValidator {
                    ctx,
                    alternatives: vec![ShapeRef::Shape(inner), ShapeRef::Shape(&NULL_SHAPE)],
                }
                .validate(value),
                Shape::Any => AnyValidator.validate(value),
                Shape::Nothing => NothingValidator { ctx }.validate(value),
                Shape::Pattern(pattern) => PatternValidator { ctx, pattern }.validate(value),
                Shape::Literal(literal) => ShapeValidator {
                    ctx,
                    shape: ShapeRef::Literal(literal),
                }
                .validate(value),
            },
        }
    }
}
