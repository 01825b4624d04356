//! Configuration loading and attach-time normalization.
//!
//! `load_str`/`load_file` parse a TOML document into an `AclConfig`, then
//! run the same `normalize` pass that hand-built configurations go through
//! before being handed to `Acl::new`:
//!
//! 1. The container path must be flat — a dotted path is rejected outright,
//!    since nested ACL placement is not supported.
//! 2. The reserved `acl` scope is appended with the configured container
//!    path as its only governed path, overwriting any caller-supplied scope
//!    of the same name.

use std::path::Path;

use tracing::{debug, warn};

use tagacl_contracts::{AclConfig, AclError, AclResult, ScopeConfig, ACL_SCOPE};

/// Parse `s` as TOML and normalize the result.
///
/// Returns `AclError::ConfigError` when the TOML is malformed or does not
/// match the `AclConfig` schema, or when normalization rejects the path.
pub fn load_str(s: &str) -> AclResult<AclConfig> {
    let config: AclConfig = toml::from_str(s).map_err(|e| AclError::ConfigError {
        reason: format!("failed to parse acl config TOML: {}", e),
    })?;
    normalize(config)
}

/// Read the file at `path` and parse it as TOML ACL configuration.
pub fn load_file(path: &Path) -> AclResult<AclConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| AclError::ConfigError {
        reason: format!("failed to read acl config file '{}': {}", path.display(), e),
    })?;
    load_str(&contents)
}

/// Validate and normalize a configuration for attachment.
///
/// Idempotent: normalizing an already-normalized configuration yields the
/// same result.
pub fn normalize(mut config: AclConfig) -> AclResult<AclConfig> {
    if config.path.contains('.') {
        warn!(path = %config.path, "nested acl path rejected");
        return Err(AclError::ConfigError {
            reason: format!(
                "acl path '{}' must not be nested (no '.' separators)",
                config.path
            ),
        });
    }

    // The reserved scope always wins over a caller-supplied one, and its
    // path set is exactly the container's own field path.
    config.scopes.retain(|s| s.name != ACL_SCOPE);
    config
        .scopes
        .push(ScopeConfig::new(ACL_SCOPE, vec![config.path.clone()]));

    debug!(
        path = %config.path,
        scopes = config.scopes.len(),
        lowest_access = config.lowest_access,
        "acl configuration normalized"
    );
    Ok(config)
}
