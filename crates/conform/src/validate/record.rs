//! Record validator
//!
//! Records are strict: every value key must be declared, and every declared
//! field must be present unless its shape is not required. Keys on both
//! sides are compared in normalized string form.

use conform_value::{Map, Value, ValueKind};
use indexmap::IndexMap;

use crate::shape::Shape;

use super::context::MatchContext;
use super::error::{Mismatch, ValidatorError};
use super::primitive::kind_mismatch;
use super::{ShapeRef, ShapeValidator, Validator};

/// Declared fields of the record being matched.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RecordFields<'s> {
    /// Fields of a `Shape::Record`, already keyed by normalized name
    Declared(&'s IndexMap<String, Shape>),
    /// A bare map in a shape position
    Bare(&'s Map),
}

impl<'s> RecordFields<'s> {
    fn get(self, name: &str) -> Option<ShapeRef<'s>> {
        match self {
            RecordFields::Declared(fields) => fields.get(name).map(ShapeRef::Shape),
            RecordFields::Bare(map) => map
                .iter()
                .find(|(key, _)| key.normalized() == name)
                .map(|(_, shape)| ShapeRef::Literal(shape)),
        }
    }

    fn entries(self) -> Vec<(String, ShapeRef<'s>)> {
        match self {
            RecordFields::Declared(fields) => fields
                .iter()
                .map(|(name, shape)| (name.clone(), ShapeRef::Shape(shape)))
                .collect(),
            RecordFields::Bare(map) => map
                .iter()
                .map(|(key, shape)| (key.normalized(), ShapeRef::Literal(shape)))
                .collect(),
        }
    }
}

// =============================================================================
// RecordValidator
// =============================================================================

/// Validates maps against declared fields.
///
/// Order of checks, all of which run:
/// 1. value keys that are not declared (`unexpected key`)
/// 2. declared required fields missing from the value
/// 3. each present declared field against its shape
pub(crate) struct RecordValidator<'a, 'o, 's> {
    pub ctx: &'a MatchContext<'o>,
    pub fields: RecordFields<'s>,
}

impl Validator for RecordValidator<'_, '_, '_> {
    fn validate(&mut self, value: &Value) -> Result<bool, ValidatorError> {
        let Value::Map(map) = value else {
            return Ok(kind_mismatch(self.ctx, value, &ValueKind::Map));
        };

        let present: Vec<(String, &Value)> = map
            .iter()
            .map(|(key, field_value)| (key.normalized(), field_value))
            .collect();

        let mut all_match = true;

        for (key, _) in &present {
            if self.fields.get(key).is_none() {
                self.ctx.push_path_key(key.as_str());
                self.ctx
                    .record_error(Mismatch::UnexpectedKey { key: key.clone() });
                self.ctx.pop_path();
                all_match = false;
            }
        }

        for (name, shape) in self.fields.entries() {
            let is_present = present.iter().any(|(key, _)| *key == name);
            if !is_present && shape.is_required() {
                self.ctx.push_path_key(name.as_str());
                self.ctx
                    .record_error(Mismatch::MissingRequiredKey { key: name.clone() });
                self.ctx.pop_path();
                all_match = false;
            }
        }

        for (key, field_value) in &present {
            let Some(shape) = self.fields.get(key) else {
                continue;
            };

            self.ctx.push_path_key(key.as_str());

            let mut child_validator = ShapeValidator {
                ctx: self.ctx,
                shape,
            };
            let matched = child_validator.validate(field_value)?;

            self.ctx.pop_path();
            all_match &= matched;
        }

        Ok(all_match)
    }
}
