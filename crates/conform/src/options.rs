//! Match configuration.

use serde::{Deserialize, Serialize};

/// Sentinel key at the top of every error tree.
pub const DEFAULT_ROOT_KEY: &str = "_root_";

/// Options controlling how diagnostics are keyed and rendered.
///
/// Deserializable so hosts can embed it in their own configuration files;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MatchOptions {
    /// Key of the root node in the error tree.
    pub root_key: String,
    /// Prefix of array-index segments in the error tree.
    pub index_prefix: String,
    /// Render `ValidationOutput::message` as indented JSON.
    pub pretty: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            root_key: DEFAULT_ROOT_KEY.to_string(),
            index_prefix: conform_value::path::INDEX_PREFIX.to_string(),
            pretty: true,
        }
    }
}

impl MatchOptions {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let options = MatchOptions::from_json_str(r##"{"index-prefix": "#"}"##).unwrap();
        assert_eq!(options.index_prefix, "#");
        assert_eq!(options.root_key, "_root_");
        assert!(options.pretty);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(MatchOptions::from_json_str("{").is_err());
    }
}
