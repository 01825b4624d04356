//! The per-document ACL container and its tags.
//!
//! A container holds an ordered working set of [`Tag`]s plus the canonical
//! grant list derived from them by the last merge. Tag order and, within a
//! tag, grant order are semantic: the merge resolves conflicts on the same
//! (scope, grantee) pair by letting the last-listed entry win.

use serde::{Deserialize, Serialize};

use crate::grant::Grant;
use crate::grantee::{Grantee, GranteeSet};

/// One independent source of permission assertions.
///
/// A tag typically corresponds to one editing session or one policy source.
/// Multiple tags may assign conflicting permissions to the same
/// (scope, grantee) pair; only the merge step resolves this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Caller-chosen tag name, unique within the container.
    pub name: String,
    /// This tag's working grants, in insertion order.
    pub grants: Vec<Grant>,
}

impl Tag {
    /// Create an empty tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grants: Vec::new(),
        }
    }
}

/// The ACL structure stored under the document's configured ACL field.
///
/// `grants` is the canonical, derived view produced by the last merge.
/// Invariant immediately after a merge: at most one entry per distinct
/// (scope, grantee) pair, valued by whichever tag listed that pair last in
/// iteration order across all tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclContainer {
    /// The mutable working set, in creation order.
    pub tags: Vec<Tag>,
    /// The canonical merged grant list. Replaced wholesale on every merge.
    pub grants: Vec<Grant>,
}

impl AclContainer {
    /// Create an empty container (no tags, no canonical grants).
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tag by name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Look up a tag by name, creating an empty one at the end of the tag
    /// list if it does not exist yet.
    pub fn ensure_tag(&mut self, name: &str) -> &mut Tag {
        if let Some(idx) = self.tags.iter().position(|t| t.name == name) {
            return &mut self.tags[idx];
        }
        self.tags.push(Tag::new(name));
        self.tags.last_mut().expect("tag was just pushed")
    }

    /// Remove the named tag. Returns true when a tag was actually removed.
    pub fn remove_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.name != name);
        self.tags.len() != before
    }

    /// Names of all tags currently present, in stored order.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }

    /// Distinct grantees known to the canonical grant list for `scope`.
    ///
    /// This is the defaulting set used when resetting a whole scope to a
    /// new permission level.
    pub fn grantees_in_scope(&self, scope: &str) -> GranteeSet {
        self.grants
            .iter()
            .filter(|g| g.scope == scope)
            .map(|g| g.grantee.clone())
            .collect::<Vec<Grantee>>()
            .into()
    }
}
