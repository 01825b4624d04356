//! The accessibility filter: which documents can these grantees reach?
//!
//! `find_accessible_by` turns a (grantee-set, minimum-permission, scope)
//! triple into an [`AccessQuery`]: a structural predicate over a document's
//! canonical grant list, plus an optional field projection. The predicate
//! can be evaluated in memory against any [`AclContainer`], or exported as
//! a JSON filter document in array-contains form for storage layers that
//! speak that dialect. It composes with caller-supplied filters on the same
//! query — it never replaces them.

use std::collections::BTreeSet;

use serde_json::json;
use tracing::{debug, warn};

use tagacl_contracts::{AclConfig, AclContainer, AclError, AclResult, GranteeSet, ACL_SCOPE};

use crate::select::select_list;

/// The structural predicate over canonical grants.
///
/// Matches a document iff its canonical grant list contains at least one
/// element whose scope equals `scope`, whose grantee is a member of
/// `grantees`, and whose permission is at or above `min_permission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessFilter {
    /// The configured ACL container path (the array lives at
    /// `"<acl_path>.grants"` in the persisted document).
    pub acl_path: String,
    /// The scope the matching grant must target.
    pub scope: String,
    /// The acceptable grantees.
    pub grantees: GranteeSet,
    /// The inclusive permission threshold.
    pub min_permission: i64,
}

impl AccessFilter {
    /// Evaluate this filter against one container's canonical grants.
    ///
    /// Raising `min_permission` can only shrink the set of matching
    /// containers, never grow it.
    pub fn matches(&self, container: &AclContainer) -> bool {
        container.grants.iter().any(|g| {
            g.scope == self.scope
                && self.grantees.contains(&g.grantee)
                && g.permission >= self.min_permission
        })
    }

    /// Export the filter as a JSON document in array-contains form:
    ///
    /// ```json
    /// { "acl.grants": { "$elemMatch": {
    ///     "scope": "info",
    ///     "grantee": { "$in": ["alice", "bob"] },
    ///     "permission": { "$gte": 1 } } } }
    /// ```
    pub fn to_document(&self) -> serde_json::Value {
        let grantees: Vec<&str> = self.grantees.iter().map(|g| g.0.as_str()).collect();
        let elem_match = json!({
            "$elemMatch": {
                "scope": self.scope,
                "grantee": { "$in": grantees },
                "permission": { "$gte": self.min_permission },
            }
        });

        let mut doc = serde_json::Map::new();
        doc.insert(format!("{}.grants", self.acl_path), elem_match);
        serde_json::Value::Object(doc)
    }
}

/// An accessibility filter plus the optional field projection that keeps
/// the ACL field readable on the filtered documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessQuery {
    /// The structural grant predicate.
    pub filter: AccessFilter,
    /// Field paths to restrict the projection to, when requested.
    pub projection: Option<BTreeSet<String>>,
}

/// Build the accessibility query for the given grantees and threshold.
///
/// Fails with `InvalidPermission` when `permission` is below the configured
/// floor, and `MissingScope` when `scope` is empty. When `select_acl_scope`
/// is true, the projection is restricted to the paths of the reserved `acl`
/// scope so the filtered documents come back with a usable ACL field.
pub fn find_accessible_by(
    config: &AclConfig,
    grantees: impl Into<GranteeSet>,
    permission: i64,
    scope: &str,
    select_acl_scope: bool,
) -> AclResult<AccessQuery> {
    if permission < config.lowest_access {
        warn!(
            permission,
            lowest = config.lowest_access,
            "accessibility query below permission floor"
        );
        return Err(AclError::InvalidPermission {
            permission,
            lowest: config.lowest_access,
        });
    }
    if scope.is_empty() {
        return Err(AclError::MissingScope);
    }

    let grantees = grantees.into();
    debug!(
        scope = %scope,
        grantees = grantees.len(),
        permission,
        "built accessibility filter"
    );

    let projection = select_acl_scope.then(|| select_list(config, &[ACL_SCOPE]));

    Ok(AccessQuery {
        filter: AccessFilter {
            acl_path: config.path.clone(),
            scope: scope.to_string(),
            grantees,
            min_permission: permission,
        },
        projection,
    })
}
