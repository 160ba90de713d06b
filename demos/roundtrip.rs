//! Write/read/delete round trip against the live vault.
//!
//! Run with `cargo run --example roundtrip`. Requires Windows; on other
//! platforms the operations report that the vault is unavailable.

use credvault::GenericCredential;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("credvault=debug")),
        )
        .init();

    let target = "credvault/demo";

    let mut cred = GenericCredential::new(target);
    cred.user_name = "demo-user".to_string();
    cred.comment = "created by the credvault roundtrip demo".to_string();
    cred.credential_blob = b"demo secret".to_vec();
    if let Err(err) = cred.write() {
        eprintln!("write failed: {err}");
        return;
    }
    println!("wrote credential '{target}'");

    match GenericCredential::get(target) {
        Ok(fetched) => {
            println!(
                "read back: user '{}', {} secret bytes, last written {}",
                fetched.user_name,
                fetched.credential_blob.len(),
                fetched.last_written
            );
        }
        Err(err) => eprintln!("read failed: {err}"),
    }

    match cred.delete() {
        Ok(()) => println!("deleted credential '{target}'"),
        Err(err) => eprintln!("delete failed: {err}"),
    }
}
