//! tagacl — Demo CLI
//!
//! Runs one or all of the end-to-end ACL scenarios against the in-memory
//! reference document: tag accumulation, last-write-wins merging, tag
//! rejection, and collection filtering by accessibility.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- single-tag
//!   cargo run -p demo -- multi-tag
//!   cargo run -p demo -- accessible

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// tagacl — tag-scoped ACL engine demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "tagacl engine demo",
    long_about = "Runs tagacl demo scenarios showing grant accumulation across tags,\n\
                  last-write-wins merging, tag rejection, and accessibility filtering."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all scenarios in sequence.
    RunAll,
    /// One tag, two scopes, one merge.
    SingleTag,
    /// Three tags merged, then one rejected.
    MultiTag,
    /// Filter a document collection by accessibility.
    Accessible,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::SingleTag => scenarios::single_tag(),
        Command::MultiTag => scenarios::multi_tag(),
        Command::Accessible => scenarios::accessible(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> tagacl_contracts::AclResult<()> {
    scenarios::single_tag()?;
    scenarios::multi_tag()?;
    scenarios::accessible()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("tagacl — tag-scoped ACL engine");
    println!("==============================");
    println!();
    println!("Per-commit flow:");
    println!("  [1] Writer bound to a tag accumulates grants/denials per scope");
    println!("  [2] apply() merges all tags: last write wins per (scope, grantee)");
    println!("  [3] Canonical grants answer access queries and explain snapshots");
    println!("  [4] AccessFilter selects reachable documents at a collection level");
    println!();
}
