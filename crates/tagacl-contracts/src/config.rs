//! Static ACL configuration — the scope table attached to a document type.
//!
//! Configuration is fixed per document type and never mutated after setup.
//! Loading and attach-time normalization (reserved scope, path validation)
//! live in the `tagacl-config` crate; this module only defines the shape.

use serde::{Deserialize, Serialize};

/// Default field path the ACL container is stored under.
pub const ACL_PATH: &str = "acl";

/// Name of the reserved scope that always maps to the ACL field itself.
pub const ACL_SCOPE: &str = "acl";

/// Maps a logical access scope to the document field paths it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Scope name, unique within a configuration.
    pub name: String,
    /// Field paths this scope exposes.
    pub paths: Vec<String>,
}

impl ScopeConfig {
    /// Create a scope from a name and its governed paths.
    pub fn new(name: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            name: name.into(),
            paths,
        }
    }
}

/// The full ACL configuration for one document type.
///
/// In TOML, `path` and `lowest_access` may be omitted:
///
/// ```toml
/// [[scopes]]
/// name = "info"
/// paths = ["address"]
///
/// [[scopes]]
/// name = "money"
/// paths = ["locker", "piggy_bank"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Field path the ACL container lives under. Must not be nested (no
    /// path-separator dots). Defaults to `"acl"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// The configured scopes. A reserved scope named `acl` is appended by
    /// normalization, overwriting any caller-supplied scope of that name.
    pub scopes: Vec<ScopeConfig>,

    /// The minimum legal and default permission level. Defaults to 0.
    #[serde(default)]
    pub lowest_access: i64,
}

fn default_path() -> String {
    ACL_PATH.to_string()
}

impl AclConfig {
    /// Create a configuration with the default path and floor.
    pub fn new(scopes: Vec<ScopeConfig>) -> Self {
        Self {
            path: default_path(),
            scopes,
            lowest_access: 0,
        }
    }

    /// True when a scope with the given name is configured.
    pub fn has_scope(&self, name: &str) -> bool {
        self.scopes.iter().any(|s| s.name == name)
    }

    /// All configured scope names, in declaration order.
    pub fn scope_names(&self) -> Vec<String> {
        self.scopes.iter().map(|s| s.name.clone()).collect()
    }

    /// The field paths governed by the named scope, if configured.
    pub fn paths_for(&self, name: &str) -> Option<&[String]> {
        self.scopes
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.paths.as_slice())
    }
}
