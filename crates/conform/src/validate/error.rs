//! Validation error types
//!
//! Two categories of errors:
//! - `Mismatch`: Soft mismatches recorded in the error tree (non-fatal)
//! - `ValidatorError`: Contract violations that abort the match

use conform_value::ValuePath;
use thiserror::Error;

// =============================================================================
// ValidatorError (fail-fast contract violations)
// =============================================================================

/// Errors that abort a match.
///
/// These mean the shape or the way it is used is wrong, not that the value
/// is. They never appear in the error tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidatorError {
    /// `Pattern` is only defined over text
    #[error("pattern {pattern} applied to non-text value {value} at path {path}")]
    PatternOnNonText {
        pattern: String,
        value: String,
        path: ValuePath,
    },

    /// A bare empty array reached as a shape position
    #[error("empty sequence template at path {path}: its first element is the element shape")]
    EmptySequenceTemplate { path: ValuePath },
}

// =============================================================================
// Mismatch (recorded messages)
// =============================================================================

/// A value not conforming to a shape.
///
/// The `Display` form is the message stored in the error tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Mismatch {
    #[error("{value} is not instance of {kind}")]
    NotInstanceOf { value: String, kind: String },

    #[error("unexpected key {key:?}")]
    UnexpectedKey { key: String },

    #[error("required key {key:?} not present")]
    MissingRequiredKey { key: String },

    #[error("key present when not allowed")]
    KeyNotAllowed,

    #[error("{value} does not match {pattern}")]
    PatternMismatch { value: String, pattern: String },

    #[error("{value} is not equal to (==) {literal}")]
    NotEqual { value: String, literal: String },

    /// One summary for a whole failed union.
    #[error("{}", format_no_alternative(value, rejected))]
    NoAlternativeMatched {
        value: String,
        rejected: RejectedAlternatives,
    },
}

/// Alternatives of a failed union, bucketed by how they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectedAlternatives {
    /// Compound shapes that did not match
    pub shapes: Vec<String>,
    /// Kinds the value is not an instance of
    pub kinds: Vec<String>,
    /// Literals the value is not equal to
    pub literals: Vec<String>,
}

impl RejectedAlternatives {
    pub fn len(&self) -> usize {
        self.shapes.len() + self.kinds.len() + self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn format_no_alternative(value: &str, rejected: &RejectedAlternatives) -> String {
    let mut msg = format!("{value} did not match any alternative");
    if !rejected.shapes.is_empty() {
        msg.push_str(&format!("; rejected shapes: {}", rejected.shapes.join(", ")));
    }
    if !rejected.kinds.is_empty() {
        msg.push_str(&format!("; not instance of: {}", rejected.kinds.join(", ")));
    }
    if !rejected.literals.is_empty() {
        msg.push_str(&format!("; not equal to (==): {}", rejected.literals.join(", ")));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_message_lists_every_bucket() {
        let mismatch = Mismatch::NoAlternativeMatched {
            value: "null".to_string(),
            rejected: RejectedAlternatives {
                shapes: vec!["Sequence[text]".to_string()],
                kinds: vec!["integer".to_string(), "text".to_string()],
                literals: vec!["1".to_string(), "\"x\"".to_string()],
            },
        };
        assert_eq!(
            mismatch.to_string(),
            r#"null did not match any alternative; rejected shapes: Sequence[text]; not instance of: integer, text; not equal to (==): 1, "x""#
        );
    }

    #[test]
    fn test_union_message_skips_empty_buckets() {
        let mismatch = Mismatch::NoAlternativeMatched {
            value: "5".to_string(),
            rejected: RejectedAlternatives {
                kinds: vec!["text".to_string()],
                ..Default::default()
            },
        };
        assert_eq!(mismatch.to_string(), "5 did not match any alternative; not instance of: text");
    }

    #[test]
    fn test_key_messages_quote_key() {
        assert_eq!(
            Mismatch::UnexpectedKey { key: "b".to_string() }.to_string(),
            r#"unexpected key "b""#
        );
        assert_eq!(
            Mismatch::MissingRequiredKey { key: "a".to_string() }.to_string(),
            r#"required key "a" not present"#
        );
    }
}
