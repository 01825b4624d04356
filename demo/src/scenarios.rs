//! End-to-end demo scenarios over the in-memory document.

use tagacl_contracts::{AclConfig, AclResult};
use tagacl_core::{Acl, AclDocument, MemoryDocument};
use tagacl_query::find_accessible_by;

const HOME_TOML: &str = r#"
[[scopes]]
name = "info"
paths = ["address"]

[[scopes]]
name = "money"
paths = ["locker", "piggy_bank"]
"#;

fn home_acl() -> AclResult<Acl> {
    let config: AclConfig = tagacl_config::load_str(HOME_TOML)?;
    Ok(Acl::new(config))
}

/// One tag, three grantees, two scopes, one merge.
pub fn single_tag() -> AclResult<()> {
    println!("-- single tag --");

    let acl = home_acl()?;
    let mut doc = MemoryDocument::new();

    acl.get_acl(&mut doc, Some("first"))?
        .scope("info")?
        .grant_access("alice", 0)?
        .grant_access("bob", 1)?
        .grant_access("carol", 2)?
        .end()
        .scope("info")?
        .deny_access("bob")?
        .grant_access("alice", 42)?
        .end()
        .scope("money")?
        .grant_access("alice", 1)?
        .deny_access("bob")?
        .end()
        .apply()?;

    let container = doc.acl("acl").expect("container initialized by get_acl");
    println!(
        "merged {} tag(s) into {} canonical grant(s)",
        container.tags.len(),
        container.grants.len()
    );

    for grantee in ["alice", "bob", "carol"] {
        let levels = acl.explain_acl(&mut doc, grantee)?;
        println!("  {grantee}: {levels:?}");
    }
    println!();
    Ok(())
}

/// The same grants split across three tags, then one tag rejected.
pub fn multi_tag() -> AclResult<()> {
    println!("-- multiple tags --");

    let acl = home_acl()?;
    let mut doc = MemoryDocument::new();

    acl.get_acl(&mut doc, Some("first"))?
        .scope("info")?
        .grant_access("alice", 0)?
        .grant_access("bob", 1)?
        .grant_access("carol", 2)?;

    acl.get_acl(&mut doc, Some("second"))?
        .scope("info")?
        .deny_access("bob")?
        .grant_access("alice", 42)?;

    acl.get_acl(&mut doc, Some("third"))?
        .scope("money")?
        .grant_access("alice", 1)?
        .deny_access("bob")?
        .apply()?;

    let writer = acl.get_acl(&mut doc, None)?;
    println!("tags after merge: {:?}", writer.tags());
    println!("alice in info: {}", writer.scope("info")?.access("alice")?);

    // Withdraw the second editing session; the first becomes authoritative.
    acl.get_acl(&mut doc, Some("second"))?.reject();
    acl.get_acl(&mut doc, None)?.apply()?;

    let writer = acl.get_acl(&mut doc, None)?;
    println!("tags after rejecting 'second': {:?}", writer.tags());
    println!("alice in info: {}", writer.scope("info")?.access("alice")?);
    println!();
    Ok(())
}

/// Filter a small collection of documents by accessibility.
pub fn accessible() -> AclResult<()> {
    println!("-- accessibility filter --");

    let acl = home_acl()?;

    let mut homes = Vec::new();
    for (owner, level) in [("alice", 2), ("bob", 1), ("carol", 0)] {
        let mut doc = MemoryDocument::new();
        acl.get_acl(&mut doc, Some("setup"))?
            .scope("info")?
            .grant_access(owner, level)?
            .apply()?;
        homes.push((owner, doc));
    }

    let query = find_accessible_by(acl.config(), ["alice", "bob", "carol"], 1, "info", true)?;
    println!("filter document:");
    println!(
        "{}",
        serde_json::to_string_pretty(&query.filter.to_document())
            .expect("filter document serializes")
    );
    if let Some(projection) = &query.projection {
        println!("projection: {projection:?}");
    }

    for (owner, doc) in &homes {
        let container = doc.acl("acl").expect("container initialized during setup");
        let reachable = query.filter.matches(container);
        println!("  {owner}'s home accessible at level >= 1: {reachable}");
    }
    println!();
    Ok(())
}
