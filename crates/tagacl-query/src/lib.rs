//! # tagacl-query
//!
//! Collection-level building blocks for the tagacl engine: the
//! accessibility filter (which documents can these grantees reach at this
//! permission level?) and scope-to-path projection. Both are pure functions
//! over configuration and canonical grant state — nothing here touches a
//! working tag or performs I/O.

pub mod filter;
pub mod select;

pub use filter::{find_accessible_by, AccessFilter, AccessQuery};
pub use select::{select, select_list};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tagacl_contracts::{
        AclConfig, AclContainer, AclError, Grant, Grantee, ScopeConfig, ACL_SCOPE,
    };

    use crate::{find_accessible_by, select, select_list};

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn home_config() -> AclConfig {
        let mut config = AclConfig::new(vec![
            ScopeConfig::new("info", vec!["address".to_string()]),
            ScopeConfig::new(
                "money",
                vec!["locker".to_string(), "piggy_bank".to_string()],
            ),
            ScopeConfig::new("household", vec!["address".to_string(), "locker".to_string()]),
        ]);
        let path = config.path.clone();
        config.scopes.push(ScopeConfig::new(ACL_SCOPE, vec![path]));
        config
    }

    /// A container whose canonical list grants `grantee` `permission` in
    /// `scope`.
    fn container_with(scope: &str, grantee: &str, permission: i64) -> AclContainer {
        let mut container = AclContainer::new();
        container
            .grants
            .push(Grant::new(Grantee::new(grantee), permission, scope));
        container
    }

    // ── select_list / select ─────────────────────────────────────────────────

    #[test]
    fn select_list_always_contains_the_acl_path() {
        let config = home_config();

        let none = select_list(&config, &[]);
        assert_eq!(none.len(), 1);
        assert!(none.contains("acl"));
    }

    #[test]
    fn select_list_deduplicates_across_scopes() {
        let config = home_config();

        // "household" overlaps both "info" and "money" paths.
        let paths = select_list(&config, &["info", "money", "household"]);
        assert_eq!(paths.len(), 4);
        assert!(paths.contains("address"));
        assert!(paths.contains("locker"));
        assert!(paths.contains("piggy_bank"));
        assert!(paths.contains("acl"));
    }

    #[test]
    fn select_list_is_independent_of_request_order() {
        let config = home_config();

        assert_eq!(
            select_list(&config, &["info", "money"]),
            select_list(&config, &["money", "info"])
        );
    }

    #[test]
    fn select_list_ignores_unknown_scopes() {
        let config = home_config();

        let paths = select_list(&config, &["no-such-scope"]);
        assert_eq!(paths.len(), 1);
        assert!(paths.contains("acl"));
    }

    #[test]
    fn select_joins_paths_with_spaces() {
        let config = home_config();

        let joined = select(&config, &["info"]);
        let parts: Vec<&str> = joined.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts.contains(&"acl"));
        assert!(parts.contains(&"address"));
    }

    // ── find_accessible_by preconditions ─────────────────────────────────────

    #[test]
    fn query_below_permission_floor_is_rejected() {
        let config = home_config();

        let result = find_accessible_by(&config, "alice", -1, "info", true);
        assert!(matches!(
            result,
            Err(AclError::InvalidPermission { permission: -1, lowest: 0 })
        ));
    }

    #[test]
    fn query_without_scope_is_rejected() {
        let config = home_config();

        let result = find_accessible_by(&config, "alice", 1, "", true);
        assert!(matches!(result, Err(AclError::MissingScope)));
    }

    // ── Filter evaluation ────────────────────────────────────────────────────

    #[test]
    fn filter_matches_on_scope_grantee_and_threshold() {
        let config = home_config();
        let query = find_accessible_by(&config, "alice", 2, "info", false).unwrap();

        assert!(query.filter.matches(&container_with("info", "alice", 2)));
        assert!(query.filter.matches(&container_with("info", "alice", 9)));
        assert!(!query.filter.matches(&container_with("info", "alice", 1)));
        assert!(!query.filter.matches(&container_with("money", "alice", 2)));
        assert!(!query.filter.matches(&container_with("info", "bob", 2)));
    }

    #[test]
    fn filter_ignores_unmerged_tag_grants() {
        let config = home_config();
        let query = find_accessible_by(&config, "alice", 1, "info", false).unwrap();

        let mut container = AclContainer::new();
        container
            .ensure_tag("draft")
            .grants
            .push(Grant::new(Grantee::new("alice"), 5, "info"));

        // Only canonical grants count.
        assert!(!query.filter.matches(&container));
    }

    #[test]
    fn raising_the_threshold_never_grows_the_result_set() {
        let config = home_config();
        let docs = vec![
            container_with("info", "alice", 0),
            container_with("info", "alice", 1),
            container_with("info", "alice", 2),
            container_with("info", "bob", 5),
        ];

        let mut previous = usize::MAX;
        for threshold in 0..=3 {
            let query = find_accessible_by(&config, "alice", threshold, "info", false).unwrap();
            let matched = docs.iter().filter(|d| query.filter.matches(d)).count();
            assert!(matched <= previous, "threshold {threshold} grew the result set");
            previous = matched;
        }
    }

    #[test]
    fn empty_grantee_set_matches_nothing() {
        let config = home_config();
        let query =
            find_accessible_by(&config, Vec::<Grantee>::new(), 0, "info", false).unwrap();

        assert!(!query.filter.matches(&container_with("info", "alice", 5)));
    }

    // ── Projection and export ────────────────────────────────────────────────

    #[test]
    fn projection_present_only_when_requested() {
        let config = home_config();

        let with = find_accessible_by(&config, "alice", 1, "info", true).unwrap();
        let projection = with.projection.expect("projection requested");
        assert!(projection.contains("acl"));

        let without = find_accessible_by(&config, "alice", 1, "info", false).unwrap();
        assert!(without.projection.is_none());
    }

    #[test]
    fn to_document_emits_array_contains_form() {
        let config = home_config();
        let query = find_accessible_by(&config, ["alice", "bob"], 1, "info", false).unwrap();

        let doc = query.filter.to_document();
        let elem = &doc["acl.grants"]["$elemMatch"];
        assert_eq!(elem["scope"], "info");
        assert_eq!(elem["permission"]["$gte"], 1);

        let ids = elem["grantee"]["$in"].as_array().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&serde_json::json!("alice")));
        assert!(ids.contains(&serde_json::json!("bob")));
    }

    #[test]
    fn to_document_follows_a_custom_container_path() {
        let mut config = home_config();
        config.path = "permissions".to_string();

        let query = find_accessible_by(&config, "alice", 0, "info", false).unwrap();
        let doc = query.filter.to_document();
        assert!(doc.get("permissions.grants").is_some());
    }
}
