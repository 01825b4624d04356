//! # tagacl-contracts
//!
//! Shared types and error contracts for the tagacl engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, the grantee-set normalizer, and the
//! unified error type.

pub mod config;
pub mod container;
pub mod error;
pub mod grant;
pub mod grantee;

pub use config::{AclConfig, ScopeConfig, ACL_PATH, ACL_SCOPE};
pub use container::{AclContainer, Tag};
pub use error::{AclError, AclResult};
pub use grant::{Grant, GrantId};
pub use grantee::{Grantee, GranteeSet};
