//! # credvault
//!
//! Typed, memory-safe access to the Windows Credential Manager. Credentials
//! can be read, written, deleted and enumerated without ever handling a raw
//! `CREDENTIALW` record or OS-owned memory.
//!
//! ## Architecture
//!
//! The library is organized into modular components:
//!
//! - **core**: Domain types ([`Credential`], [`CredentialType`], [`Persist`])
//!   and the convenience store API ([`GenericCredential`], [`DomainPassword`],
//!   [`list`], [`filtered_list`])
//! - **errors**: Unified error taxonomy mapped from Win32 status codes
//! - **adapters**: The wide-string codec, the `CREDENTIALW` marshaling layer
//!   and the four native vault operations
//!
//! ## Example
//!
//! ```no_run
//! use credvault::GenericCredential;
//!
//! let mut cred = GenericCredential::new("my-app/api-token");
//! cred.user_name = "svc_deploy".to_string();
//! cred.credential_blob = b"my secret".to_vec();
//! cred.write()?;
//!
//! let fetched = GenericCredential::get("my-app/api-token")?;
//! assert_eq!(fetched.credential_blob, b"my secret");
//! fetched.delete()?;
//! # Ok::<(), credvault::Error>(())
//! ```
//!
//! ## Platform support
//!
//! The vault itself exists only on Windows. On other platforms the crate
//! still builds, the codec and marshaling layers remain fully functional,
//! and every vault operation returns [`Error::Unsupported`].
//!
//! ## Security Considerations
//!
//! - Secrets are stored by the OS, encrypted per user
//! - Secret material is never logged; trace output carries blob lengths only
//! - Each call allocates and frees its own native buffers, so concurrent
//!   calls from multiple threads are safe

mod adapters;
mod core;
mod errors;

// Re-export commonly used types
pub use crate::core::{
    filtered_list, list, Credential, CredentialAttribute, CredentialType, DomainPassword,
    GenericCredential, Persist,
};
pub use errors::Error;

// Low-level vault operations, the contract surface the store API builds on
pub use adapters::{delete, enumerate, read, write};
