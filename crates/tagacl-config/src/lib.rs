//! # tagacl-config
//!
//! TOML configuration loading and attach-time normalization for the tagacl
//! engine.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use tagacl_config::load_file;
//! use tagacl_core::Acl;
//!
//! let config = load_file(Path::new("acl.toml"))?;
//! let acl = Acl::new(config);
//! ```
//!
//! A configuration file declares the scope table and, optionally, the
//! container path and permission floor:
//!
//! ```toml
//! path = "acl"
//! lowest_access = 0
//!
//! [[scopes]]
//! name = "info"
//! paths = ["address"]
//!
//! [[scopes]]
//! name = "money"
//! paths = ["locker", "piggy_bank"]
//! ```

pub mod loader;

pub use loader::{load_file, load_str, normalize};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tagacl_contracts::{AclConfig, AclError, ScopeConfig, ACL_SCOPE};

    use crate::{load_str, normalize};

    const HOME_TOML: &str = r#"
        [[scopes]]
        name = "info"
        paths = ["address"]

        [[scopes]]
        name = "money"
        paths = ["locker", "piggy_bank"]
    "#;

    #[test]
    fn load_applies_defaults_and_reserved_scope() {
        let config = load_str(HOME_TOML).unwrap();

        assert_eq!(config.path, "acl");
        assert_eq!(config.lowest_access, 0);
        assert_eq!(config.scope_names(), vec!["info", "money", "acl"]);
        assert_eq!(config.paths_for("acl").unwrap(), &["acl".to_string()]);
    }

    #[test]
    fn load_honors_explicit_path_and_floor() {
        let toml = r#"
            path = "permissions"
            lowest_access = 1

            [[scopes]]
            name = "info"
            paths = ["address"]
        "#;

        let config = load_str(toml).unwrap();
        assert_eq!(config.path, "permissions");
        assert_eq!(config.lowest_access, 1);

        // The reserved scope follows the configured container path.
        assert_eq!(
            config.paths_for("acl").unwrap(),
            &["permissions".to_string()]
        );
    }

    #[test]
    fn nested_path_is_fatal() {
        let toml = r#"
            path = "meta.acl"

            [[scopes]]
            name = "info"
            paths = ["address"]
        "#;

        match load_str(toml) {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("meta.acl"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn caller_supplied_acl_scope_is_overwritten() {
        let toml = r#"
            [[scopes]]
            name = "acl"
            paths = ["address", "locker"]
        "#;

        let config = load_str(toml).unwrap();
        assert_eq!(config.scopes.len(), 1);
        assert_eq!(config.paths_for(ACL_SCOPE).unwrap(), &["acl".to_string()]);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = load_str("this is not valid toml ][[[");

        match result {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse acl config TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let config = AclConfig::new(vec![ScopeConfig::new(
            "info",
            vec!["address".to_string()],
        )]);

        let once = normalize(config).unwrap();
        let twice = normalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
