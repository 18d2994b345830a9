//! Shape grammar
//!
//! A [`Shape`] describes the expected structure of a [`Value`]. Shapes are
//! plain immutable data: building one never looks at the values it will
//! later be matched against, and one shape can be shared by any number of
//! concurrent matches.
//!
//! # Bare literals in shape positions
//!
//! A `Shape::Literal` holding an array or a map is not compared by equality.
//! When the matcher reaches it, an array is treated as `Sequence` of its
//! first element and a map as `Record` of its entries, recursively.

use core::fmt;

use conform_value::{Map, ObjectKey, Value, ValueKind};
use indexmap::IndexMap;
use regex::Regex;

use crate::error::ShapeError;
use crate::options::MatchOptions;
use crate::validate::{self, MatchContext, ValidationOutput, ValidatorError};

#[derive(Debug, Clone)]
pub enum Shape {
    /// Value's runtime kind equals the tag
    Exact(ValueKind),
    /// Array whose every element matches the element shape
    Sequence(Box<Shape>),
    /// Map with exactly the declared fields
    Record(RecordShape),
    /// Any alternative matches
    Union(Vec<Shape>),
    /// `Union[inner, null]`, and the field may be absent from a record
    Optional(Box<Shape>),
    Any,
    /// Only satisfied by a record field that is absent
    Nothing,
    /// Text matching a regular expression
    Pattern(Pattern),
    /// Equality with a value
    Literal(Value),
}

/// Field declarations of a `Record` shape, keyed by normalized field name.
#[derive(Debug, Clone, Default)]
pub struct RecordShape {
    pub fields: IndexMap<String, Shape>,
}

impl RecordShape {
    /// Bare map lifted into record fields. Entries stay literals and are
    /// lifted further only when matched.
    pub fn from_map(map: &Map) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(k, v)| (k.normalized(), Shape::Literal(v.clone())))
                .collect(),
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl Shape {
    pub fn exact(kind: ValueKind) -> Self {
        Shape::Exact(kind)
    }

    pub fn sequence(element: impl Into<Shape>) -> Self {
        Shape::Sequence(Box::new(element.into()))
    }

    /// Record from `(key, shape)` pairs. Keys are normalized, so `1` and
    /// `"1"` name the same field.
    pub fn record<K, S>(fields: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<ObjectKey>,
        S: Into<Shape>,
    {
        Shape::Record(RecordShape {
            fields: fields
                .into_iter()
                .map(|(k, s)| (k.into().normalized(), s.into()))
                .collect(),
        })
    }

    /// Record from a dynamic value, which must be a map.
    pub fn record_from(fields: &Value) -> Result<Self, ShapeError> {
        match fields {
            Value::Map(map) => Ok(Shape::Record(RecordShape::from_map(map))),
            other => Err(ShapeError::RecordFieldsNotMapping {
                actual: other.kind(),
            }),
        }
    }

    pub fn union<S: Into<Shape>>(alternatives: impl IntoIterator<Item = S>) -> Self {
        Shape::Union(alternatives.into_iter().map(Into::into).collect())
    }

    /// Fails when `inner` already accepts null.
    pub fn optional(inner: impl Into<Shape>) -> Result<Self, ShapeError> {
        let inner = inner.into();
        if inner.is_nullable() {
            return Err(ShapeError::RedundantOptional {
                inner: inner.to_string(),
            });
        }
        Ok(Shape::Optional(Box::new(inner)))
    }

    pub fn any() -> Self {
        Shape::Any
    }

    pub fn nothing() -> Self {
        Shape::Nothing
    }

    /// Pattern that matches when the regex is found anywhere in the text.
    pub fn pattern(source: &str) -> Result<Self, ShapeError> {
        Pattern::search(source).map(Shape::Pattern)
    }

    /// Pattern that must match the whole text.
    pub fn full_pattern(source: &str) -> Result<Self, ShapeError> {
        Pattern::full_match(source).map(Shape::Pattern)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Shape::Literal(value.into())
    }

    /// Integer or float.
    pub fn numeric() -> Self {
        Shape::Union(vec![
            Shape::Exact(ValueKind::Integer),
            Shape::Exact(ValueKind::Float),
        ])
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        Shape::Union(vec![Shape::literal(true), Shape::literal(false)])
    }
}

// =============================================================================
// Queries
// =============================================================================

impl Shape {
    /// Whether a record field with this shape must be present.
    pub fn is_required(&self) -> bool {
        !matches!(self, Shape::Optional(_) | Shape::Nothing)
    }

    /// Whether this shape already accepts null or absence.
    pub fn is_nullable(&self) -> bool {
        match self {
            Shape::Exact(kind) => kind.is_null(),
            Shape::Literal(value) => value.is_null(),
            Shape::Optional(_) | Shape::Nothing => true,
            Shape::Union(alternatives) => alternatives.iter().any(Shape::is_nullable),
            _ => false,
        }
    }

    /// Match `value`, discarding diagnostics.
    pub fn matches(&self, value: &Value) -> Result<bool, ValidatorError> {
        validate::matches(self, value)
    }

    /// Match `value`, keeping diagnostics.
    pub fn validate(&self, value: &Value) -> Result<ValidationOutput, ValidatorError> {
        validate::validate(self, value)
    }

    pub fn validate_with(
        &self,
        value: &Value,
        options: &MatchOptions,
    ) -> Result<ValidationOutput, ValidatorError> {
        validate::validate_with(self, value, options)
    }

    /// Match `value` recording diagnostics into an existing context at its
    /// current path.
    pub fn matches_in(&self, value: &Value, ctx: &MatchContext<'_>) -> Result<bool, ValidatorError> {
        validate::match_in(self, value, ctx)
    }
}

// =============================================================================
// Pattern
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternMode {
    /// Regex found anywhere in the text
    #[default]
    Search,
    /// Regex covers the whole text
    FullMatch,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    mode: PatternMode,
    regex: Regex,
}

impl Pattern {
    pub fn search(source: &str) -> Result<Self, ShapeError> {
        Self::compile(source, PatternMode::Search)
    }

    pub fn full_match(source: &str) -> Result<Self, ShapeError> {
        Self::compile(source, PatternMode::FullMatch)
    }

    fn compile(source: &str, mode: PatternMode) -> Result<Self, ShapeError> {
        let compiled = match mode {
            PatternMode::Search => Regex::new(source),
            PatternMode::FullMatch => Regex::new(&format!(r"\A(?:{source})\z")),
        };
        let regex = compiled.map_err(|error| ShapeError::InvalidPattern {
            pattern: source.to_string(),
            error,
        })?;
        Ok(Self {
            source: source.to_string(),
            mode,
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The regex as written, without full-match anchoring.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> PatternMode {
        self.mode
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            mode: PatternMode::Search,
            regex,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValueKind> for Shape {
    fn from(kind: ValueKind) -> Self {
        Shape::Exact(kind)
    }
}

impl From<Value> for Shape {
    fn from(value: Value) -> Self {
        Shape::Literal(value)
    }
}

impl From<Pattern> for Shape {
    fn from(pattern: Pattern) -> Self {
        Shape::Pattern(pattern)
    }
}

impl From<Regex> for Shape {
    fn from(regex: Regex) -> Self {
        Shape::Pattern(Pattern::from(regex))
    }
}

impl From<RecordShape> for Shape {
    fn from(record: RecordShape) -> Self {
        Shape::Record(record)
    }
}

impl From<&str> for Shape {
    fn from(s: &str) -> Self {
        Shape::Literal(Value::from(s))
    }
}

impl From<bool> for Shape {
    fn from(b: bool) -> Self {
        Shape::Literal(Value::from(b))
    }
}

impl From<i64> for Shape {
    fn from(n: i64) -> Self {
        Shape::Literal(Value::from(n))
    }
}

impl From<i32> for Shape {
    fn from(n: i32) -> Self {
        Shape::Literal(Value::from(n))
    }
}

impl From<f64> for Shape {
    fn from(x: f64) -> Self {
        Shape::Literal(Value::from(x))
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Exact(kind) => write!(f, "{kind}"),
            Shape::Sequence(element) => write!(f, "Sequence[{element}]"),
            Shape::Record(record) => {
                write!(f, "Record{{")?;
                for (i, (name, shape)) in record.fields.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {shape}")?;
                }
                write!(f, "}}")
            }
            Shape::Union(alternatives) => {
                write!(f, "Union[")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                write!(f, "]")
            }
            Shape::Optional(inner) => write!(f, "Optional[{inner}]"),
            Shape::Any => write!(f, "Any"),
            Shape::Nothing => write!(f, "Nothing"),
            Shape::Pattern(pattern) => match pattern.mode() {
                PatternMode::Search => write!(f, "Pattern({pattern})"),
                PatternMode::FullMatch => write!(f, "FullPattern({pattern})"),
            },
            Shape::Literal(value) => write!(f, "{value}"),
        }
    }
}
