//! The ACL accessor: resolves a container and hands out writers.
//!
//! An [`Acl`] holds the normalized configuration for one document type and
//! is the only way to obtain an [`AclWriter`]. `get_acl` guards against
//! operating on a document whose ACL field was projected away, lazily
//! initializes the container, and lazily creates named tags.

use std::collections::BTreeMap;

use tracing::debug;

use tagacl_contracts::{AclConfig, AclError, AclResult, GranteeSet};

use crate::traits::{AclDocument, ModifySink};
use crate::writer::{AclWriter, Binding};

/// The per-document-type entry point into the ACL engine.
///
/// Construct with a configuration normalized by the `tagacl-config` crate
/// (or hand-built to the same shape: reserved `acl` scope present, flat
/// field path). One `Acl` serves any number of documents.
pub struct Acl {
    config: AclConfig,
}

impl Acl {
    /// Wrap a normalized configuration.
    pub fn new(config: AclConfig) -> Self {
        Self { config }
    }

    /// The configuration this accessor serves.
    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// Obtain a writer over `doc`.
    ///
    /// Fails with `AclNotSelected` when the ACL field was not loaded on
    /// this document instance. Lazily initializes the container to an empty
    /// `{tags: [], grants: []}` structure. With `Some(tag)`, the named tag
    /// is created if absent and the writer binds to it; with `None`, the
    /// writer binds to the canonical container, so `access` reads the
    /// merged grant list rather than any working tag.
    pub fn get_acl<'a, D: AclDocument>(
        &'a self,
        doc: &'a mut D,
        tag: Option<&str>,
    ) -> AclResult<AclWriter<'a, D>> {
        self.writer(doc, tag, None)
    }

    /// Like [`get_acl`](Self::get_acl), additionally injecting a sink that
    /// receives one notification per structural change.
    pub fn get_acl_with_sink<'a, D: AclDocument>(
        &'a self,
        doc: &'a mut D,
        tag: Option<&str>,
        sink: &'a dyn ModifySink,
    ) -> AclResult<AclWriter<'a, D>> {
        self.writer(doc, tag, Some(sink))
    }

    /// For every configured scope, the canonical access level of `grantees`.
    ///
    /// A convenience read-only snapshot across all scopes at once, computed
    /// against the merged grant list.
    pub fn explain_acl<D: AclDocument>(
        &self,
        doc: &mut D,
        grantees: impl Into<GranteeSet>,
    ) -> AclResult<BTreeMap<String, i64>> {
        let grantees = grantees.into();
        let mut writer = self.get_acl(doc, None)?;

        let mut levels = BTreeMap::new();
        for name in writer.scopes() {
            writer = writer.scope(&name)?;
            levels.insert(name, writer.access(grantees.clone())?);
        }
        Ok(levels)
    }

    fn writer<'a, D: AclDocument>(
        &'a self,
        doc: &'a mut D,
        tag: Option<&str>,
        sink: Option<&'a dyn ModifySink>,
    ) -> AclResult<AclWriter<'a, D>> {
        if !doc.is_field_selected(&self.config.path) {
            return Err(AclError::AclNotSelected {
                path: self.config.path.clone(),
            });
        }

        let container = doc.acl_mut(&self.config.path);
        let binding = match tag {
            Some(name) => {
                container.ensure_tag(name);
                debug!(tag = %name, "bound writer to tag");
                Binding::Tag(name.to_string())
            }
            None => Binding::Canonical,
        };

        Ok(AclWriter::new(doc, &self.config, binding, sink))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tagacl_contracts::{AclConfig, AclError, ScopeConfig, ACL_SCOPE};

    use crate::memory::MemoryDocument;
    use crate::traits::AclDocument;

    use super::Acl;

    fn home_acl() -> Acl {
        let mut config = AclConfig::new(vec![ScopeConfig::new(
            "info",
            vec!["address".to_string()],
        )]);
        let path = config.path.clone();
        config.scopes.push(ScopeConfig::new(ACL_SCOPE, vec![path]));
        Acl::new(config)
    }

    #[test]
    fn get_acl_refuses_a_deselected_field() {
        let acl = home_acl();
        let mut doc = MemoryDocument::new();
        doc.deselect("acl");

        match acl.get_acl(&mut doc, Some("first")) {
            Err(AclError::AclNotSelected { path }) => assert_eq!(path, "acl"),
            other => panic!("expected AclNotSelected, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn get_acl_lazily_creates_container_and_tag() {
        let acl = home_acl();
        let mut doc = MemoryDocument::new();
        assert!(doc.acl("acl").is_none());

        let writer = acl.get_acl(&mut doc, Some("first")).unwrap();
        assert_eq!(writer.tags(), vec!["first"]);

        // A second access to the same tag does not duplicate it.
        let writer = acl.get_acl(&mut doc, Some("first")).unwrap();
        assert_eq!(writer.tags(), vec!["first"]);

        let container = doc.acl("acl").unwrap();
        assert!(container.grants.is_empty());
    }

    #[test]
    fn explain_acl_snapshots_every_scope() {
        let acl = home_acl();
        let mut doc = MemoryDocument::new();

        acl.get_acl(&mut doc, Some("first"))
            .unwrap()
            .scope("info")
            .unwrap()
            .grant_access("alice", 4)
            .unwrap()
            .apply()
            .unwrap();

        let levels = acl.explain_acl(&mut doc, "alice").unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels["info"], 4);
        assert_eq!(levels["acl"], 0);
    }

    #[test]
    fn explain_acl_reads_canonical_state_only() {
        let acl = home_acl();
        let mut doc = MemoryDocument::new();

        // Grants accumulated but never merged are invisible to explain.
        acl.get_acl(&mut doc, Some("first"))
            .unwrap()
            .scope("info")
            .unwrap()
            .grant_access("alice", 4)
            .unwrap();

        let levels = acl.explain_acl(&mut doc, "alice").unwrap();
        assert_eq!(levels["info"], 0);
    }
}
