//! # tagacl-core
//!
//! The tag accumulation, merge, and access-evaluation engine.
//!
//! ## Overview
//!
//! - [`traits::AclDocument`] — the seam to the host document (selection and
//!   modification tracking, container storage).
//! - [`Acl`] — the per-document-type entry point; resolves the container
//!   and hands out writers.
//! - [`AclWriter`] — a consuming-builder session bound to one tag (or to
//!   the canonical container), accumulating grants and merging tags with
//!   last-write-wins per (scope, grantee).
//! - [`MemoryDocument`] — in-memory reference implementation of the
//!   document contract.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use tagacl_core::{Acl, MemoryDocument};
//!
//! let acl = Acl::new(config);
//! let mut doc = MemoryDocument::new();
//!
//! acl.get_acl(&mut doc, Some("session-1"))?
//!     .scope("info")?
//!     .grant_access("alice", 2)?
//!     .end()
//!     .apply()?;
//!
//! let level = acl.get_acl(&mut doc, None)?.scope("info")?.access("alice")?;
//! ```

pub mod acl;
pub mod memory;
pub mod traits;
pub mod writer;

pub use acl::Acl;
pub use memory::MemoryDocument;
pub use traits::{AclDocument, ModifySink};
pub use writer::AclWriter;
