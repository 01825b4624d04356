//! The ACL writer: accumulation, access evaluation, and the tag merge.
//!
//! An `AclWriter` is a consuming builder bound to one document, one
//! configuration, and one binding — either a named tag (a working set of
//! grants) or the canonical container itself. Mutating operations take
//! `self` and return the next writer state, so chains read linearly:
//!
//! ```rust,ignore
//! let writer = acl.get_acl(&mut doc, Some("first"))?
//!     .scope("info")?
//!     .grant_access("alice", 2)?
//!     .deny_access("bob")?
//!     .end()
//!     .apply()?;
//! ```
//!
//! The merge invariant is absolute: after `apply()`, the canonical grant
//! list holds at most one entry per distinct (scope, grantee) pair, valued
//! by whichever tag listed that pair last across all tags in stored order —
//! last-write-wins, keyed by a genuine (scope, grantee) composite key.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use tagacl_contracts::{AclConfig, AclError, AclResult, Grant, Grantee, GranteeSet};

use crate::traits::{AclDocument, ModifySink};

/// What a writer's read and write operations are bound to.
#[derive(Debug, Clone)]
pub(crate) enum Binding {
    /// The container itself: reads and writes go to the canonical grant
    /// list. Produced by `get_acl(None)` for querying final merged state.
    Canonical,
    /// One named tag's working grant list.
    Tag(String),
}

/// A stateful, chainable ACL session over one document.
///
/// Constructed via [`Acl::get_acl`](crate::Acl::get_acl); never directly.
/// Holds the document mutably for its lifetime, so merge and access always
/// observe a consistent container.
pub struct AclWriter<'a, D: AclDocument> {
    doc: &'a mut D,
    config: &'a AclConfig,
    sink: Option<&'a dyn ModifySink>,
    binding: Binding,
    current_scope: Option<String>,
}

impl<'a, D: AclDocument> AclWriter<'a, D> {
    pub(crate) fn new(
        doc: &'a mut D,
        config: &'a AclConfig,
        binding: Binding,
        sink: Option<&'a dyn ModifySink>,
    ) -> Self {
        Self {
            doc,
            config,
            sink,
            binding,
            current_scope: None,
        }
    }

    // ── Scope selection and introspection ────────────────────────────────────

    /// Select the active scope for subsequent `access`/grant calls.
    ///
    /// Returns `InvalidScope` when `name` is not among the configured scope
    /// names (the reserved `acl` scope counts as configured).
    pub fn scope(mut self, name: &str) -> AclResult<Self> {
        if !self.config.has_scope(name) {
            warn!(scope = %name, "unknown scope requested");
            return Err(AclError::InvalidScope {
                scope: name.to_string(),
            });
        }
        self.current_scope = Some(name.to_string());
        Ok(self)
    }

    /// All configured scope names, including the reserved `acl` scope.
    pub fn scopes(&self) -> Vec<String> {
        self.config.scope_names()
    }

    /// Names of all tags currently present on the document's container.
    pub fn tags(&self) -> Vec<String> {
        self.doc
            .acl(&self.config.path)
            .map(|c| c.tag_names())
            .unwrap_or_default()
    }

    /// Explicit modified flag: true when the ACL field has been changed on
    /// this document since it was loaded (or since the host cleared it).
    pub fn is_dirty(&self) -> bool {
        self.doc.is_field_modified(&self.config.path)
    }

    // ── Access evaluation ────────────────────────────────────────────────────

    /// Maximum permission granted to `grantees` within the current scope.
    ///
    /// Evaluates against the bound view only: a tag-bound writer sees that
    /// tag's working grants (pre-merge inspection); a canonical-bound writer
    /// sees the merged grant list. Returns `lowest_access` when no grant
    /// matches or the grantee set is empty.
    pub fn access(&self, grantees: impl Into<GranteeSet>) -> AclResult<i64> {
        let scope = self.selected_scope()?;
        let grantees = grantees.into();

        let level = self
            .view_grants()
            .iter()
            .filter(|g| g.matches(&scope, &grantees))
            .fold(self.config.lowest_access, |acc, g| acc.max(g.permission));

        Ok(level)
    }

    // ── Grant accumulation ───────────────────────────────────────────────────

    /// Set `permission` for the given grantees in the current scope.
    ///
    /// Validates the permission floor and the grantee set before touching
    /// anything, so a failure never leaves a partial mutation. Per grantee:
    /// appends a fresh grant when none matches (scope, grantee) in the bound
    /// view, updates in place when the permission differs, and does nothing
    /// when the grant already matches exactly — an idempotent re-grant emits
    /// no modification signal.
    pub fn grant_access(
        mut self,
        grantees: impl Into<GranteeSet>,
        permission: i64,
    ) -> AclResult<Self> {
        let scope = self.selected_scope()?;
        self.check_permission(permission)?;

        let grantees = grantees.into();
        if grantees.is_empty() {
            warn!(scope = %scope, "grant requested with an empty grantee set");
            return Err(AclError::MissingGrantees);
        }

        if self.write_grants(&scope, &grantees, permission) {
            debug!(
                scope = %scope,
                grantees = grantees.len(),
                permission,
                "granted access"
            );
            self.mark_modified();
        }
        Ok(self)
    }

    /// Reset every grantee known to the canonical grant list for the current
    /// scope to `permission`.
    ///
    /// This is the "grantees omitted" mode: the grantee set defaults to the
    /// distinct grantees already present in the merged, document-level list
    /// for this scope. Returns `MissingGrantees` when that list knows nobody
    /// for the scope.
    pub fn reset_access(mut self, permission: i64) -> AclResult<Self> {
        let scope = self.selected_scope()?;
        self.check_permission(permission)?;

        let known = self
            .doc
            .acl(&self.config.path)
            .map(|c| c.grantees_in_scope(&scope))
            .unwrap_or_default();
        if known.is_empty() {
            warn!(scope = %scope, "reset requested but no grantees are known for this scope");
            return Err(AclError::MissingGrantees);
        }

        if self.write_grants(&scope, &known, permission) {
            debug!(
                scope = %scope,
                grantees = known.len(),
                permission,
                "reset access for all known grantees"
            );
            self.mark_modified();
        }
        Ok(self)
    }

    /// Deny the given grantees: grant them the configured floor.
    ///
    /// The grant record is retained with its value floored, not deleted.
    pub fn deny_access(self, grantees: impl Into<GranteeSet>) -> AclResult<Self> {
        let lowest = self.config.lowest_access;
        self.grant_access(grantees, lowest)
    }

    /// Deny every grantee known to the canonical list for the current scope.
    pub fn deny_all(self) -> AclResult<Self> {
        let lowest = self.config.lowest_access;
        self.reset_access(lowest)
    }

    /// Chain-readability no-op.
    pub fn end(self) -> Self {
        self
    }

    // ── Merge and rejection ──────────────────────────────────────────────────

    /// Merge all tags into the canonical grant list.
    ///
    /// Skips entirely when the ACL field is unmodified. Otherwise folds
    /// every tag's grants, in stored order, into a map keyed by the
    /// (scope, grantee) pair — a later entry overwrites an earlier one
    /// regardless of which tag it came from. The canonical list is replaced
    /// with one freshly-identified grant per pair, in map enumeration order.
    ///
    /// Re-applying without intervening mutation finds the canonical list
    /// already equal to the merge result and performs no further structural
    /// change (and emits no modification signal).
    pub fn apply(mut self) -> AclResult<Self> {
        if !self.doc.is_field_modified(&self.config.path) {
            debug!(path = %self.config.path, "acl unmodified, skipping merge");
            return Ok(self);
        }

        let container = self.doc.acl_mut(&self.config.path);

        let mut merged: BTreeMap<(String, Grantee), i64> = BTreeMap::new();
        for tag in &container.tags {
            for grant in &tag.grants {
                merged.insert((grant.scope.clone(), grant.grantee.clone()), grant.permission);
            }
        }

        let unchanged = container.grants.len() == merged.len()
            && container
                .grants
                .iter()
                .all(|g| merged.get(&(g.scope.clone(), g.grantee.clone())) == Some(&g.permission));
        if unchanged {
            debug!(grants = merged.len(), "merge result already canonical");
            return Ok(self);
        }

        let count = merged.len();
        container.grants = merged
            .into_iter()
            .map(|((scope, grantee), permission)| Grant::new(grantee, permission, scope))
            .collect();

        debug!(grants = count, "merged tags into canonical grant list");
        if count > 0 {
            self.mark_modified();
        }
        Ok(self)
    }

    /// Remove this writer's tag from the container's tag list.
    ///
    /// The tag's contribution disappears from the canonical list on the
    /// next merge. On a canonical-bound writer there is no tag to remove;
    /// the call is a no-op and emits no modification signal.
    pub fn reject(mut self) -> Self {
        if let Binding::Tag(name) = self.binding.clone() {
            if self.doc.acl_mut(&self.config.path).remove_tag(&name) {
                debug!(tag = %name, "rejected tag");
                self.mark_modified();
            }
        }
        self
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn selected_scope(&self) -> AclResult<String> {
        self.current_scope.clone().ok_or(AclError::ScopeNotSelected)
    }

    fn check_permission(&self, permission: i64) -> AclResult<()> {
        if permission < self.config.lowest_access {
            warn!(
                permission,
                lowest = self.config.lowest_access,
                "permission below configured floor"
            );
            return Err(AclError::InvalidPermission {
                permission,
                lowest: self.config.lowest_access,
            });
        }
        Ok(())
    }

    /// The grants visible to read operations under the current binding.
    fn view_grants(&self) -> &[Grant] {
        let Some(container) = self.doc.acl(&self.config.path) else {
            return &[];
        };
        match &self.binding {
            Binding::Canonical => &container.grants,
            Binding::Tag(name) => container
                .tag(name)
                .map(|t| t.grants.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Upsert one grant per grantee into the bound grant list.
    ///
    /// Returns true when anything actually changed.
    fn write_grants(&mut self, scope: &str, grantees: &GranteeSet, permission: i64) -> bool {
        let container = self.doc.acl_mut(&self.config.path);
        let grants = match &self.binding {
            Binding::Canonical => &mut container.grants,
            Binding::Tag(name) => &mut container.ensure_tag(name).grants,
        };

        let mut touched = false;
        for grantee in grantees.iter() {
            match grants
                .iter_mut()
                .find(|g| g.scope == scope && g.grantee == *grantee)
            {
                Some(g) if g.permission == permission => {}
                Some(g) => {
                    g.permission = permission;
                    touched = true;
                }
                None => {
                    grants.push(Grant::new(grantee.clone(), permission, scope));
                    touched = true;
                }
            }
        }
        touched
    }

    /// Route every structural change through the document flag and the
    /// optional notification sink.
    fn mark_modified(&mut self) {
        self.doc.mark_field_modified(&self.config.path);
        if let Some(sink) = self.sink {
            sink.on_modify(&self.config.path);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
