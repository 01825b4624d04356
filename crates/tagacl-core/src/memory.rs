//! In-memory implementation of `AclDocument`.
//!
//! `MemoryDocument` is the reference implementation of the host-document
//! contract, used by the test suites and the demo binary. It tracks field
//! selection and modification explicitly, so tests can simulate partial
//! projections (`deselect`) and persistence cycles (`clear_modified`).

use std::collections::{BTreeMap, BTreeSet};

use tagacl_contracts::AclContainer;

use crate::traits::AclDocument;

/// A free-standing document with explicit selection/modification tracking.
///
/// All fields start out selected and unmodified, matching a freshly loaded
/// full document.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    deselected: BTreeSet<String>,
    modified: BTreeSet<String>,
    fields: BTreeMap<String, AclContainer>,
}

impl MemoryDocument {
    /// Create an empty document with every field selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a projection that excluded `path`.
    pub fn deselect(&mut self, path: &str) {
        self.deselected.insert(path.to_string());
    }

    /// Re-include a previously deselected field.
    pub fn select(&mut self, path: &str) {
        self.deselected.remove(path);
    }

    /// Clear the modification flag for `path`, as a successful save would.
    pub fn clear_modified(&mut self, path: &str) {
        self.modified.remove(path);
    }
}

impl AclDocument for MemoryDocument {
    fn is_field_selected(&self, path: &str) -> bool {
        !self.deselected.contains(path)
    }

    fn is_field_modified(&self, path: &str) -> bool {
        self.modified.contains(path)
    }

    fn mark_field_modified(&mut self, path: &str) {
        self.modified.insert(path.to_string());
    }

    fn acl(&self, path: &str) -> Option<&AclContainer> {
        self.fields.get(path)
    }

    fn acl_mut(&mut self, path: &str) -> &mut AclContainer {
        self.fields.entry(path.to_string()).or_default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tagacl_contracts::{AclContainer, Grant, Grantee};

    use crate::traits::AclDocument;

    use super::MemoryDocument;

    #[test]
    fn selection_and_modification_flags_are_independent_per_field() {
        let mut doc = MemoryDocument::new();
        assert!(doc.is_field_selected("acl"));
        assert!(!doc.is_field_modified("acl"));

        doc.deselect("acl");
        doc.mark_field_modified("other");

        assert!(!doc.is_field_selected("acl"));
        assert!(doc.is_field_modified("other"));
        assert!(!doc.is_field_modified("acl"));

        doc.select("acl");
        assert!(doc.is_field_selected("acl"));
    }

    #[test]
    fn clear_modified_simulates_a_save() {
        let mut doc = MemoryDocument::new();
        doc.mark_field_modified("acl");
        assert!(doc.is_field_modified("acl"));

        doc.clear_modified("acl");
        assert!(!doc.is_field_modified("acl"));
    }

    #[test]
    fn stored_container_survives_a_serde_round_trip() {
        let mut doc = MemoryDocument::new();
        let container = doc.acl_mut("acl");
        container
            .ensure_tag("first")
            .grants
            .push(Grant::new(Grantee::new("alice"), 2, "info"));
        container.grants.push(Grant::new(Grantee::new("bob"), 1, "info"));

        // The container is what the host persists under the ACL field.
        let json = serde_json::to_string(doc.acl("acl").unwrap()).unwrap();
        let decoded: AclContainer = serde_json::from_str(&json).unwrap();
        assert_eq!(&decoded, doc.acl("acl").unwrap());
    }
}
