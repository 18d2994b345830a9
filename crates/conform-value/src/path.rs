use core::fmt::{self, Display};

use crate::prelude_internal::*;

/// Prefix used when rendering sequence indices as path segments.
pub const INDEX_PREFIX: &str = "idx_";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, from_iter)]
pub struct ValuePath(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Map field, by its normalized key
    Key(String),
    /// Array element
    Index(usize),
}

impl ValuePath {
    /// Create an empty path representing the value root
    pub fn root() -> Self {
        ValuePath(Vec::new())
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Build a path from its dotted display form, e.g. `tags.idx_1`.
    ///
    /// `(root)` and the empty string both denote the root. Keys containing
    /// `.` cannot be expressed this way.
    pub fn parse_dotted(s: &str) -> Self {
        if s.is_empty() || s == "(root)" {
            return Self::root();
        }
        s.split('.').map(PathSegment::parse).collect()
    }
}

impl PathSegment {
    fn parse(s: &str) -> Self {
        match s.strip_prefix(INDEX_PREFIX).and_then(|n| n.parse().ok()) {
            Some(index) => PathSegment::Index(index),
            None => PathSegment::Key(s.to_string()),
        }
    }

    /// Render this segment, using `index_prefix` for array indices.
    pub fn render(&self, index_prefix: &str) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => format!("{index_prefix}{index}"),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{INDEX_PREFIX}{index}"),
        }
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
