//! Lists vault credentials, optionally filtered by a prefix pattern.
//!
//! Run with `cargo run --example list [filter]`, e.g.
//! `cargo run --example list "TERMSRV/*"`.

use credvault::{filtered_list, list};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("credvault=debug")),
        )
        .init();

    let filter = std::env::args().nth(1);
    let result = match filter.as_deref() {
        Some(filter) => filtered_list(filter),
        None => list(),
    };

    match result {
        Ok(credentials) => {
            println!("{} credential(s)", credentials.len());
            for cred in &credentials {
                println!(
                    "  {} (user '{}', {} attribute(s))",
                    cred.target_name,
                    cred.user_name,
                    cred.attributes.len()
                );
            }
        }
        Err(err) => eprintln!("enumeration failed: {err}"),
    }
}
