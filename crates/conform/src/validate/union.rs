//! Union validator
//!
//! Every alternative is tried against a forked state so that errors from
//! rejected alternatives never leak into the caller's tree. When none
//! matches, a single summary is recorded at the current path.

use conform_value::Value;

use crate::shape::Shape;

use super::context::MatchContext;
use super::error::{Mismatch, RejectedAlternatives, ValidatorError};
use super::{ShapeRef, ShapeValidator, Validator};

// =============================================================================
// UnionValidator
// =============================================================================

/// Validates a value against alternatives in declaration order.
///
/// All alternatives are evaluated, including after one has matched. Each
/// rejected alternative is bucketed as soon as it fails.
pub(crate) struct UnionValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub alternatives: Vec<ShapeRef<'s>>,
}

impl Validator for UnionValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        let mut any_matched = false;
        let mut rejected = RejectedAlternatives::default();

        for (index, alternative) in self.alternatives.iter().enumerate() {
            let matched = try_alternative(self.ctx, *alternative, value)?;
            tracing::trace!(index, %alternative, matched, "union alternative");

            if matched {
                any_matched = true;
            } else {
                reject(&mut rejected, *alternative);
            }
        }

        if !any_matched {
            self.ctx.record_error(Mismatch::NoAlternativeMatched {
                value: value.to_string(),
                rejected,
            });
        }
        Ok(any_matched)
    }
}

/// Match one alternative in isolation; its errors are dropped.
fn try_alternative(
    ctx: &MatchContext<'_>,
    alternative: ShapeRef<'_>,
    value: &Value,
) -> Result<bool, ValidatorError> {
    let trial_ctx = MatchContext::with_state(ctx.options, ctx.fork_state());
    let mut child_validator = ShapeValidator {
        ctx: &trial_ctx,
        shape: alternative,
    };
    child_validator.validate(value)
}

fn reject(rejected: &mut RejectedAlternatives, alternative: ShapeRef<'_>) {
    match alternative {
        ShapeRef::Shape(Shape::Exact(kind)) => rejected.kinds.push(kind.to_string()),
        ShapeRef::Shape(Shape::Literal(literal)) | ShapeRef::Literal(literal)
            if is_scalar(literal) =>
        {
            rejected.literals.push(literal.to_string())
        }
        other => rejected.shapes.push(other.to_string()),
    }
}

/// Arrays and maps in shape positions are templates, not literals.
fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Map(_))
}
