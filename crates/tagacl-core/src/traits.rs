//! Trait seams between the ACL engine and its host.
//!
//! Two traits define the complete boundary:
//!
//! - `AclDocument` — the host document (storage shape, field selection and
//!   modification tracking). The engine never assumes anything else about
//!   the document.
//! - `ModifySink`  — an injected notification channel for structural
//!   changes, replacing implicit event emission. Optional.
//!
//! The engine itself performs no persistence and no I/O; implementations of
//! `AclDocument` decide what "field selected" and "field modified" mean for
//! their storage layer.

use tagacl_contracts::AclContainer;

/// The contract a host document must satisfy to carry an ACL.
///
/// `path` is always the configured ACL field path; implementations may
/// track other fields too, but the engine only ever asks about that one.
pub trait AclDocument {
    /// True when the field at `path` was loaded/selected on this instance.
    ///
    /// The accessor refuses to operate on documents where the ACL field was
    /// projected away — reading an absent field as "empty ACL" would
    /// silently discard grants on the next write.
    fn is_field_selected(&self, path: &str) -> bool;

    /// True when the field at `path` has been modified since the document
    /// was loaded (or since the flag was last cleared by the host).
    fn is_field_modified(&self, path: &str) -> bool;

    /// Record that the field at `path` changed structurally.
    fn mark_field_modified(&mut self, path: &str);

    /// The ACL container stored at `path`, if one exists.
    fn acl(&self, path: &str) -> Option<&AclContainer>;

    /// Mutable access to the container at `path`, creating an empty one
    /// (no tags, no canonical grants) if absent.
    fn acl_mut(&mut self, path: &str) -> &mut AclContainer;
}

/// Receives a notification for every structural ACL change.
///
/// Injected at writer construction by callers that need change
/// notification; the writer calls `on_modify` exactly once per structural
/// change, immediately after `AclDocument::mark_field_modified`. Idempotent
/// re-grants produce no call.
pub trait ModifySink {
    /// Called with the configured ACL field path after each change.
    fn on_modify(&self, path: &str);
}
