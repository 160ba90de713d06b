//! Vault operation stubs for platforms without a Windows credential vault.
//!
//! Keeps the crate, its codec and its marshaling layer compilable and
//! testable everywhere; the four operations themselves report
//! [`Error::Unsupported`].

use crate::core::{Credential, CredentialType};
use crate::errors::Error;

/// See the Windows implementation; always fails off-platform.
pub fn read(_target_name: &str, _cred_type: CredentialType) -> Result<Credential, Error> {
    Err(Error::Unsupported)
}

/// See the Windows implementation; always fails off-platform.
pub fn write(_cred: &Credential, _cred_type: CredentialType) -> Result<(), Error> {
    Err(Error::Unsupported)
}

/// See the Windows implementation; always fails off-platform.
pub fn delete(_target_name: &str, _cred_type: CredentialType) -> Result<(), Error> {
    Err(Error::Unsupported)
}

/// See the Windows implementation; always fails off-platform.
pub fn enumerate(_filter: &str, _allow_empty: bool) -> Result<Vec<Credential>, Error> {
    Err(Error::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_report_unsupported() {
        assert_eq!(
            read("t1", CredentialType::Generic).unwrap_err(),
            Error::Unsupported
        );
        assert_eq!(
            write(&Credential::default(), CredentialType::Generic).unwrap_err(),
            Error::Unsupported
        );
        assert_eq!(
            delete("t1", CredentialType::Generic).unwrap_err(),
            Error::Unsupported
        );
        assert_eq!(enumerate("", true).unwrap_err(), Error::Unsupported);
    }
}
