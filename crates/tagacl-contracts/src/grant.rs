//! Grant records — one permission assertion per (scope, grantee).

use serde::{Deserialize, Serialize};

use crate::grantee::{Grantee, GranteeSet};

/// Unique identifier for a single grant record.
///
/// Freshly generated for every grant appended to a tag, and again for every
/// canonical grant produced by a merge — canonical grants never reuse the
/// ids of the tag grants they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantId(pub uuid::Uuid);

impl GrantId {
    /// Create a new, unique grant ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for GrantId {
    fn default() -> Self {
        Self::new()
    }
}

/// One subject's permission level within one scope.
///
/// Inside a tag, a grant is attributed to that tag's working set; in the
/// container's top-level list it is canonical — the merged, effective value.
/// Permission is an integer where higher means more access; the configured
/// `lowest_access` floor is the minimum legal and default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Unique id of this record.
    pub id: GrantId,
    /// The subject this grant applies to.
    pub grantee: Grantee,
    /// Granted permission level.
    pub permission: i64,
    /// Name of the scope this grant governs.
    pub scope: String,
}

impl Grant {
    /// Create a grant with a fresh [`GrantId`].
    pub fn new(grantee: Grantee, permission: i64, scope: impl Into<String>) -> Self {
        Self {
            id: GrantId::new(),
            grantee,
            permission,
            scope: scope.into(),
        }
    }

    /// True iff this grant targets `scope` and one of `grantees`.
    ///
    /// Equality on both scope and grantee is by value.
    pub fn matches(&self, scope: &str, grantees: &GranteeSet) -> bool {
        self.scope == scope && grantees.contains(&self.grantee)
    }
}
