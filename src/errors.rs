//! Error types for credvault
//!
//! This module defines the unified error taxonomy for all vault operations,
//! mapping raw Win32 status codes into typed variants.

use thiserror::Error;

/// Win32 `ERROR_INVALID_PARAMETER`
const CODE_INVALID_PARAMETER: u32 = 87;
/// Win32 `ERROR_NOT_FOUND`
const CODE_NOT_FOUND: u32 = 1168;
/// Win32 `ERROR_BAD_USERNAME`
const CODE_BAD_USERNAME: u32 = 2202;

/// Error type for all credential vault operations
///
/// Every native-layer failure surfaces as one of these variants; unmapped
/// status codes carry the raw Win32 code for diagnostics. The single
/// exception is the "no matches" status on enumeration, which the adapter
/// normalizes to an empty successful result before an error is ever built.
///
/// # Architecture Notes
/// - Uses thiserror for automatic Display and Error trait implementations
/// - Classification is shared across read, write, delete and enumerate
/// - No retries are performed; retry policy belongs to the caller
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested credential does not exist in the vault
    #[error("Element not found.")]
    ElementNotFound,

    /// The target name was empty or otherwise malformed
    #[error("The parameter is incorrect.")]
    InvalidParameter,

    /// The vault rejected a write because the user name is missing or
    /// invalid for the requested credential type
    #[error("The specified username is invalid.")]
    BadUsername,

    /// Any other Win32 status, carried through for diagnostics
    #[error("Credential vault error ({code})")]
    Other {
        code: u32,
    },

    /// The credential vault is not available on this platform
    #[error("Operation not supported on this platform")]
    Unsupported,
}

impl Error {
    /// Classifies a raw Win32 error code into the vault error taxonomy
    pub fn from_code(code: u32) -> Self {
        match code {
            CODE_NOT_FOUND => Error::ElementNotFound,
            CODE_INVALID_PARAMETER => Error::InvalidParameter,
            CODE_BAD_USERNAME => Error::BadUsername,
            code => Error::Other { code },
        }
    }

    /// Classifies an error reported by the `windows` crate.
    ///
    /// The crate wraps Win32 codes in an HRESULT (`0x8007xxxx`); the low
    /// word is the original status code.
    #[cfg(windows)]
    pub(crate) fn from_win32(err: windows::core::Error) -> Self {
        Self::from_code(err.code().0 as u32 & 0xFFFF)
    }

    /// Returns an error code string for categorization in logs
    pub fn code(&self) -> &'static str {
        match self {
            Error::ElementNotFound => "NOT_FOUND",
            Error::InvalidParameter => "INVALID_PARAMETER",
            Error::BadUsername => "BAD_USERNAME",
            Error::Other { .. } => "OTHER",
            Error::Unsupported => "UNSUPPORTED",
        }
    }
}
