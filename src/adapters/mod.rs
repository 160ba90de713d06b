//! Platform adapters
//!
//! The codec and marshaling layers are pure memory code and build on every
//! platform; only the vault operations touch the Windows API. Off Windows,
//! a stub adapter keeps the surface intact and reports `Unsupported`.

pub(crate) mod codec;
pub(crate) mod marshal;

#[cfg(windows)]
mod vault;
#[cfg(not(windows))]
mod vault_unsupported;

#[cfg(windows)]
pub use vault::{delete, enumerate, read, write};
#[cfg(not(windows))]
pub use vault_unsupported::{delete, enumerate, read, write};
