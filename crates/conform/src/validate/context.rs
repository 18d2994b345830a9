//! Match context and output types
//!
//! `MatchContext` manages state during one match:
//! - Options used for keying the error tree
//! - Current path through the value
//! - Accumulated error tree

use std::cell::RefCell;

use conform_value::{PathSegment, ValuePath};

use crate::options::MatchOptions;
use crate::report::ErrorTree;

use super::error::Mismatch;

// =============================================================================
// ValidationOutput (final result for public API)
// =============================================================================

/// Final result of a match with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutput {
    /// The value conforms to the shape
    pub is_valid: bool,
    /// Mismatches keyed by path; empty iff `is_valid`
    pub errors: ErrorTree,
    /// Rendered `errors`, empty when valid
    pub message: String,
}

// =============================================================================
// MatchState (internal mutable state)
// =============================================================================

/// Mutable state of one match.
#[derive(Debug)]
pub struct MatchState {
    /// Current path in the value
    pub path: ValuePath,
    /// Accumulated mismatches
    pub errors: ErrorTree,
}

impl MatchState {
    pub fn new(options: &MatchOptions) -> Self {
        Self {
            path: ValuePath::root(),
            errors: ErrorTree::new(options),
        }
    }

    /// Record a mismatch at the current path (matching continues).
    pub fn record_error(&mut self, mismatch: Mismatch) {
        self.errors.add_error(&self.path, mismatch.to_string());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    // -------------------------------------------------------------------------
    // Path management
    // -------------------------------------------------------------------------

    /// Push a map field to the path.
    pub fn push_path_key(&mut self, key: impl Into<String>) {
        self.path.push(PathSegment::Key(key.into()));
    }

    /// Push an array index to the path.
    pub fn push_path_index(&mut self, index: usize) {
        self.path.push(PathSegment::Index(index));
    }

    /// Pop the last segment from the path.
    pub fn pop_path(&mut self) {
        let popped = self.path.pop();
        debug_assert!(popped.is_some(), "pop_path on root path");
    }

    /// Fresh state at the same path, for trial matching.
    pub fn fork(&self, options: &MatchOptions) -> Self {
        Self {
            path: self.path.clone(),
            errors: ErrorTree::new(options),
        }
    }
}

// =============================================================================
// MatchContext (shared options + RefCell for state)
// =============================================================================

/// Context threaded by reference through one match.
///
/// Uses interior mutability so validators can record errors through a
/// shared reference. A context belongs to a single top-level match and is
/// not `Sync`.
pub struct MatchContext<'a> {
    pub options: &'a MatchOptions,
    pub state: RefCell<MatchState>,
}

impl<'a> MatchContext<'a> {
    pub fn new(options: &'a MatchOptions) -> Self {
        Self {
            options,
            state: RefCell::new(MatchState::new(options)),
        }
    }

    /// Create a context with existing state (for trial matching).
    pub fn with_state(options: &'a MatchOptions, state: MatchState) -> Self {
        Self {
            options,
            state: RefCell::new(state),
        }
    }

    pub fn record_error(&self, mismatch: Mismatch) {
        self.state.borrow_mut().record_error(mismatch);
    }

    pub fn has_errors(&self) -> bool {
        self.state.borrow().has_errors()
    }

    /// Get a clone of the current path.
    pub fn path(&self) -> ValuePath {
        self.state.borrow().path.clone()
    }

    pub fn push_path_key(&self, key: impl Into<String>) {
        self.state.borrow_mut().push_path_key(key);
    }

    pub fn push_path_index(&self, index: usize) {
        self.state.borrow_mut().push_path_index(index);
    }

    pub fn pop_path(&self) {
        self.state.borrow_mut().pop_path();
    }

    /// Fork for trial matching (returns forked state).
    pub fn fork_state(&self) -> MatchState {
        self.state.borrow().fork(self.options)
    }

    /// Consume context and produce final output.
    pub fn finish(self) -> ValidationOutput {
        let state = self.state.into_inner();
        let is_valid = state.errors.is_empty();
        let message = match (is_valid, self.options.pretty) {
            (true, _) => String::new(),
            (false, true) => format!("{:#}", state.errors),
            (false, false) => state.errors.to_string(),
        };
        ValidationOutput {
            is_valid,
            errors: state.errors,
            message,
        }
    }
}
