//! Error types for the tagacl engine.
//!
//! Every failure in the engine is a local precondition violation — invalid
//! input to a synchronous in-memory transform. There is no retry policy and
//! no partial-failure state: an operation either fully succeeds or returns
//! one of these variants before mutating anything.

use thiserror::Error;

/// The unified error type for all tagacl crates.
#[derive(Debug, Error)]
pub enum AclError {
    /// A scope name was passed that is not present in the configuration.
    #[error("invalid scope '{scope}' provided")]
    InvalidScope { scope: String },

    /// A grant or access operation ran before `scope()` selected a scope.
    #[error("scope is not selected")]
    ScopeNotSelected,

    /// A permission below the configured floor was requested.
    #[error("invalid permission level {permission} (lowest allowed is {lowest})")]
    InvalidPermission { permission: i64, lowest: i64 },

    /// The grantee set resolved to empty where at least one grantee is required.
    #[error("grantees must be defined")]
    MissingGrantees,

    /// An accessibility query was built without a scope.
    #[error("scope must be defined")]
    MissingScope,

    /// The ACL field was read on a document instance that never loaded it.
    ///
    /// Guards against silently operating on a partial projection.
    #[error("acl field '{path}' is not selected on this document")]
    AclNotSelected { path: String },

    /// A configuration value is missing or invalid. Fatal at setup time.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the tagacl crates.
pub type AclResult<T> = Result<T, AclError>;
