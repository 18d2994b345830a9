//! Primitive shape validators
//!
//! Validators for: Exact, Literal, Pattern, Any, Nothing

use conform_value::{Value, ValueKind};

use crate::shape::Pattern;

use super::context::MatchContext;
use super::error::{Mismatch, ValidatorError};
use super::Validator;

/// Record a kind mismatch and report failure.
pub(crate) fn kind_mismatch(ctx: &MatchContext<'_>, value: &Value, kind: &ValueKind) -> bool {
    ctx.record_error(Mismatch::NotInstanceOf {
        value: value.to_string(),
        kind: kind.to_string(),
    });
    false
}

// =============================================================================
// ExactValidator
// =============================================================================

/// Checks the value's runtime kind.
pub(crate) struct ExactValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub kind: &'s ValueKind,
}

impl Validator for ExactValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        if value.kind() == *self.kind {
            Ok(true)
        } else {
            Ok(kind_mismatch(self.ctx, value, self.kind))
        }
    }
}

// =============================================================================
// LiteralValidator
// =============================================================================

/// Compares the value with a literal by equality.
pub(crate) struct LiteralValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub expected: &'s Value,
}

impl Validator for LiteralValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        if value == self.expected {
            return Ok(true);
        }
        self.ctx.record_error(Mismatch::NotEqual {
            value: value.to_string(),
            literal: self.expected.to_string(),
        });
        Ok(false)
    }
}

// =============================================================================
// PatternValidator
// =============================================================================

/// Matches text against a regex. Non-text values are a contract violation.
pub(crate) struct PatternValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub pattern: &'s Pattern,
}

impl Validator for PatternValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        let Some(text) = value.as_str() else {
            return Err(ValidatorError::PatternOnNonText {
                pattern: self.pattern.to_string(),
                value: value.to_string(),
                path: self.ctx.path(),
            });
        };
        if self.pattern.is_match(text) {
            return Ok(true);
        }
        self.ctx.record_error(Mismatch::PatternMismatch {
            value: value.to_string(),
            pattern: self.pattern.to_string(),
        });
        Ok(false)
    }
}

// =============================================================================
// AnyValidator
// =============================================================================

/// Accepts every value.
pub(crate) struct AnyValidator;

impl Validator for AnyValidator {
    fn validate(&mut self, _value: &Value) -> Result<bool, ValidatorError> {
        Ok(true)
    }
}

// =============================================================================
// NothingValidator
// =============================================================================

/// Rejects every value.
///
/// A record only reaches this when the field is present; an absent
/// `Nothing` field never gets here.
pub(crate) struct NothingValidator<'a, 'o> {
    pub ctx: &'a MatchContext<'o>,
}

impl Validator for NothingValidator<'_, '_> {
    fn validate(&mut self, _value: &Value) -> Result<bool, ValidatorError> {
        self.ctx.record_error(Mismatch::KeyNotAllowed);
        Ok(false)
    }
}
