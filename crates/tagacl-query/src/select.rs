//! Scope-to-path projection.
//!
//! `select_list` resolves requested scope names to the deduplicated set of
//! document field paths they expose. The ACL container's own path is always
//! included, so a projected document always comes back with a usable ACL.

use std::collections::BTreeSet;

use tagacl_contracts::AclConfig;

/// The deduplicated field paths exposed by the requested scopes.
///
/// Unknown scope names are ignored; the result is independent of request
/// order and always contains `config.path`.
pub fn select_list(config: &AclConfig, scopes: &[&str]) -> BTreeSet<String> {
    let requested: BTreeSet<&str> = scopes.iter().copied().collect();

    let mut paths: BTreeSet<String> = config
        .scopes
        .iter()
        .filter(|s| requested.contains(s.name.as_str()))
        .flat_map(|s| s.paths.iter().cloned())
        .collect();

    paths.insert(config.path.clone());
    paths
}

/// [`select_list`] joined into the space-separated form query layers accept
/// as a field-selection clause.
pub fn select(config: &AclConfig, scopes: &[&str]) -> String {
    select_list(config, scopes)
        .into_iter()
        .collect::<Vec<String>>()
        .join(" ")
}
