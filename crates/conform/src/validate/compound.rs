//! Sequence validator

use conform_value::{Value, ValueKind};

use super::context::MatchContext;
use super::error::ValidatorError;
use super::primitive::kind_mismatch;
use super::{ShapeRef, ShapeValidator, Validator};

// =============================================================================
// SequenceValidator
// =============================================================================

/// Validates arrays whose every element matches `element`.
///
/// All elements are visited so each offending index gets its own entry.
/// An empty array matches any element shape.
pub(crate) struct SequenceValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub element: ShapeRef<'s>,
}

impl Validator for SequenceValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        let Value::Array(items) = value else {
            return Ok(kind_mismatch(self.ctx, value, &ValueKind::Array));
        };

        let mut all_match = true;
        for (i, item) in items.iter().enumerate() {
            self.ctx.push_path_index(i);

            let mut child_validator = ShapeValidator {
                ctx: self.ctx,
                shape: self.element,
            };
            let matched = child_validator.validate(item)?;

            self.ctx.pop_path();
            all_match &= matched;
        }

        Ok(all_match)
    }
}
