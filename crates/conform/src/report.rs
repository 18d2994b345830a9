//! Diagnostic tree
//!
//! Errors from one match are stored in a tree keyed by the path taken
//! through the value. The top node sits under a sentinel root key; below it
//! every map field and array index visited on the way to an error gets a
//! child node. Nodes are only created when an error is added beneath them,
//! so a tree without errors has no nodes at all.
//!
//! Rendered form:
//!
//! ```text
//! {
//!   "_root_": {
//!     "id": { "errors": ["\"1\" is not instance of integer"] },
//!     "tags": { "idx_1": { "errors": ["2 is not instance of text"] } }
//!   }
//! }
//! ```
//!
//! A record field literally named `errors` shares its key with the message
//! list in this rendering; the in-memory tree keeps them apart.

use core::fmt;

use conform_value::{PathSegment, ValuePath};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::options::MatchOptions;

/// Key under which a node's messages are rendered.
pub const ERRORS_KEY: &str = "errors";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorNode {
    errors: Vec<String>,
    children: IndexMap<String, ErrorNode>,
}

impl ErrorNode {
    /// Messages recorded at this node, in insertion order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn children(&self) -> &IndexMap<String, ErrorNode> {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<&ErrorNode> {
        self.children.get(key)
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(ErrorNode::count).sum::<usize>()
    }

    /// `prefix` is `None` at the top node, which has no path of its own.
    fn flatten_into(&self, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
        for message in &self.errors {
            out.push((prefix.unwrap_or(ROOT_DISPLAY).to_string(), message.clone()));
        }
        for (key, child) in &self.children {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };
            child.flatten_into(Some(&path), out);
        }
    }
}

impl Serialize for ErrorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(!self.errors.is_empty()) + self.children.len();
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.errors.is_empty() {
            map.serialize_entry(ERRORS_KEY, &self.errors)?;
        }
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

const ROOT_DISPLAY: &str = "(root)";

/// Path-keyed error messages from one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTree {
    root_key: String,
    index_prefix: String,
    root: Option<ErrorNode>,
}

impl Default for ErrorTree {
    fn default() -> Self {
        Self::new(&MatchOptions::default())
    }
}

impl ErrorTree {
    pub fn new(options: &MatchOptions) -> Self {
        Self {
            root_key: options.root_key.clone(),
            index_prefix: options.index_prefix.clone(),
            root: None,
        }
    }

    /// Append `message` at `path`, creating the nodes along the way.
    pub fn add_error(&mut self, path: &ValuePath, message: impl Into<String>) {
        let mut node = self.root.get_or_insert_with(ErrorNode::default);
        for segment in path.iter() {
            node = node
                .children
                .entry(segment.render(&self.index_prefix))
                .or_default();
        }
        node.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// The node under the root sentinel.
    pub fn root(&self) -> Option<&ErrorNode> {
        self.root.as_ref()
    }

    pub fn get(&self, path: &ValuePath) -> Option<&ErrorNode> {
        let mut node = self.root.as_ref()?;
        for segment in path.iter() {
            node = node.children.get(&self.render_segment(segment))?;
        }
        Some(node)
    }

    /// Messages recorded exactly at `path`.
    pub fn messages_at(&self, path: &ValuePath) -> &[String] {
        self.get(path).map(ErrorNode::errors).unwrap_or(&[])
    }

    /// `(dotted path, message)` pairs in traversal order.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.flatten_into(None, &mut out);
        }
        out
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, ErrorNode::count)
    }

    /// The rendered tree as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // string-keyed maps of strings always serialize
        serde_json::to_value(self).unwrap_or_default()
    }

    fn render_segment(&self, segment: &PathSegment) -> String {
        segment.render(&self.index_prefix)
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(usize::from(self.root.is_some())))?;
        if let Some(root) = &self.root {
            map.serialize_entry(&self.root_key, root)?;
        }
        map.end()
    }
}

/// Indented JSON with `{:#}`, compact otherwise.
impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}", self.to_json())
        } else {
            write!(f, "{}", self.to_json())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn path(s: &str) -> ValuePath {
        ValuePath::parse_dotted(s)
    }

    #[test]
    fn test_empty_tree_has_no_nodes() {
        let tree = ErrorTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.to_json(), json!({}));
    }

    #[test]
    fn test_errors_nest_by_path() {
        let mut tree = ErrorTree::default();
        tree.add_error(&path("id"), "bad id");
        tree.add_error(&path("tags.idx_1"), "bad tag");
        tree.add_error(&path("tags.idx_1"), "still bad");
        assert_eq!(
            tree.to_json(),
            json!({
                "_root_": {
                    "id": {"errors": ["bad id"]},
                    "tags": {"idx_1": {"errors": ["bad tag", "still bad"]}}
                }
            })
        );
        assert_eq!(tree.messages_at(&path("tags.idx_1")).len(), 2);
        assert!(tree.messages_at(&path("tags")).is_empty());
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_flatten_in_traversal_order() {
        let mut tree = ErrorTree::default();
        tree.add_error(&ValuePath::root(), "top");
        tree.add_error(&path("b"), "second");
        tree.add_error(&path("a"), "third");
        assert_eq!(
            tree.flatten(),
            vec![
                ("(root)".to_string(), "top".to_string()),
                ("b".to_string(), "second".to_string()),
                ("a".to_string(), "third".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_keys() {
        let options = MatchOptions {
            root_key: "$".to_string(),
            index_prefix: "#".to_string(),
            pretty: false,
        };
        let mut tree = ErrorTree::new(&options);
        tree.add_error(&ValuePath(vec![PathSegment::Index(0)]), "x");
        assert_eq!(tree.to_json(), json!({"$": {"#0": {"errors": ["x"]}}}));
        assert_eq!(tree.to_string(), r##"{"$":{"#0":{"errors":["x"]}}}"##);
    }

    #[test]
    fn test_field_named_like_root_keeps_its_prefix() {
        let mut tree = ErrorTree::default();
        tree.add_error(&ValuePath::root(), "top");
        tree.add_error(&path("(root).x"), "nested");
        assert_eq!(
            tree.flatten(),
            vec![
                ("(root)".to_string(), "top".to_string()),
                ("(root).x".to_string(), "nested".to_string()),
            ]
        );
    }

    #[test]
    fn test_node_navigation() {
        let mut tree = ErrorTree::default();
        assert_eq!(tree.root_key(), "_root_");
        assert!(tree.root().is_none());

        tree.add_error(&path("a.idx_0"), "m");
        let root = tree.root().unwrap();
        assert!(root.errors().is_empty());
        assert_eq!(root.children().keys().collect::<Vec<_>>(), vec!["a"]);

        let leaf = root.child("a").and_then(|a| a.child("idx_0")).unwrap();
        assert_eq!(leaf.errors(), ["m"]);
        assert!(root.child("idx_0").is_none());
        assert_eq!(serde_json::to_string(&tree).unwrap(), tree.to_string());
    }
}
