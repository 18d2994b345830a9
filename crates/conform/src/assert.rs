//! Assertion support for test frameworks.
//!
//! [`check`] resolves a shape (converting bare literals when needed),
//! matches the value, and produces a verdict with a message ready to be
//! used as an assertion failure. The [`assert_shape!`](crate::assert_shape)
//! and [`assert_not_shape!`](crate::assert_not_shape) macros panic with it.

use conform_value::Value;

use crate::convert::IntoShape;
use crate::validate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    Mismatched,
    /// The shape could not be built or could not be applied to the value
    ContractViolation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionOutcome {
    pub verdict: Verdict,
    pub message: String,
}

impl AssertionOutcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Matched
    }
}

pub fn check(value: &Value, shape: impl IntoShape) -> AssertionOutcome {
    let shape = match shape.into_shape() {
        Ok(shape) => shape,
        Err(e) => {
            return AssertionOutcome {
                verdict: Verdict::ContractViolation,
                message: format!("invalid shape: {e}"),
            };
        }
    };

    match validate(&shape, value) {
        Ok(output) if output.is_valid => AssertionOutcome {
            verdict: Verdict::Matched,
            message: format!("expected {value} not to match {shape}"),
        },
        Ok(output) => AssertionOutcome {
            verdict: Verdict::Mismatched,
            message: format!("expected {value} to match {shape}\n{}", output.message),
        },
        Err(e) => AssertionOutcome {
            verdict: Verdict::ContractViolation,
            message: format!("cannot match {value} against {shape}: {e}"),
        },
    }
}

/// Assert that a value matches a shape.
///
/// The value is anything convertible into [`Value`](crate::Value) (including
/// `serde_json::Value`); the shape is anything implementing
/// [`IntoShape`](crate::IntoShape).
///
/// ```
/// use conform::{ValueKind, assert_shape};
///
/// assert_shape!(serde_json::json!(["a", "b"]), vec![conform::Shape::exact(ValueKind::Text)]);
/// ```
#[macro_export]
macro_rules! assert_shape {
    ($value:expr, $shape:expr $(,)?) => {{
        let outcome = $crate::assert::check(&$crate::Value::from($value), $shape);
        if !outcome.passed() {
            panic!("{}", outcome.message);
        }
    }};
}

/// Assert that a value is a soft mismatch for a shape.
///
/// Contract violations fail this assertion too.
#[macro_export]
macro_rules! assert_not_shape {
    ($value:expr, $shape:expr $(,)?) => {{
        let outcome = $crate::assert::check(&$crate::Value::from($value), $shape);
        if outcome.verdict != $crate::assert::Verdict::Mismatched {
            panic!("{}", outcome.message);
        }
    }};
}
