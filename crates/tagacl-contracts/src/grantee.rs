//! Grantee identifiers and the grantee-set normalizer.
//!
//! Writer and query operations accept grantees in whatever shape the caller
//! has at hand — one identifier, a sequence, or a prebuilt set — and
//! normalize through [`GranteeSet`]. Normalization is total: there is no
//! failing input, and "nothing" is the empty set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier of a subject being granted or denied access.
///
/// An opaque string from the engine's perspective — typically a user or
/// group id from the hosting application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grantee(pub String);

impl Grantee {
    /// Construct a grantee from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A canonical, ordered set of grantee identifiers.
///
/// Backed by a `BTreeSet` so iteration order is deterministic — grant
/// operations visit grantees in the same order on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranteeSet {
    inner: BTreeSet<Grantee>,
}

impl GranteeSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grantee to this set.
    pub fn insert(&mut self, grantee: Grantee) {
        self.inner.insert(grantee);
    }

    /// Return true if the set contains the given grantee.
    pub fn contains(&self, grantee: &Grantee) -> bool {
        self.inner.contains(grantee)
    }

    /// Return an iterator over all grantees in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Grantee> {
        self.inner.iter()
    }

    /// Number of distinct grantees in the set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the set holds no grantees.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<Grantee> for GranteeSet {
    fn from(grantee: Grantee) -> Self {
        let mut set = Self::new();
        set.insert(grantee);
        set
    }
}

impl From<&str> for GranteeSet {
    fn from(id: &str) -> Self {
        Grantee::new(id).into()
    }
}

impl From<String> for GranteeSet {
    fn from(id: String) -> Self {
        Grantee::new(id).into()
    }
}

impl From<Vec<Grantee>> for GranteeSet {
    fn from(grantees: Vec<Grantee>) -> Self {
        grantees.into_iter().collect()
    }
}

impl From<&[&str]> for GranteeSet {
    fn from(ids: &[&str]) -> Self {
        ids.iter().map(|id| Grantee::new(*id)).collect()
    }
}

impl<const N: usize> From<[&str; N]> for GranteeSet {
    fn from(ids: [&str; N]) -> Self {
        ids.as_slice().into()
    }
}

impl From<BTreeSet<Grantee>> for GranteeSet {
    fn from(inner: BTreeSet<Grantee>) -> Self {
        Self { inner }
    }
}

impl FromIterator<Grantee> for GranteeSet {
    fn from_iter<I: IntoIterator<Item = Grantee>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GranteeSet {
    type Item = Grantee;
    type IntoIter = std::collections::btree_set::IntoIter<Grantee>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
