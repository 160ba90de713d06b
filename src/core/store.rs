//! Convenience layer over the vault operations
//!
//! Thin wrappers for the two credential types applications use most:
//! generic credentials and domain passwords. All marshaling and native-call
//! logic is delegated to the adapter layer; these types only pin the
//! credential type and provide sensible defaults.

use std::ops::{Deref, DerefMut};

use crate::adapters::{self, codec};
use crate::core::{Credential, CredentialType, Persist};
use crate::errors::Error;

/// A generic credential, usable by any application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericCredential {
    /// The underlying credential value
    pub credential: Credential,
}

impl GenericCredential {
    /// Creates a new generic credential with the given target name.
    ///
    /// Persistence defaults to `LocalMachine`. The credential is not yet
    /// stored in the vault; call [`Self::write`] to persist it.
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            credential: Credential {
                target_name: target_name.into(),
                persist: Persist::LocalMachine,
                ..Credential::default()
            },
        }
    }

    /// Fetches the generic credential with the given target name from the
    /// vault.
    pub fn get(target_name: &str) -> Result<Self, Error> {
        adapters::read(target_name, CredentialType::Generic)
            .map(|credential| Self { credential })
    }

    /// Persists the credential to the vault.
    pub fn write(&self) -> Result<(), Error> {
        adapters::write(&self.credential, CredentialType::Generic)
    }

    /// Removes the credential from the vault.
    pub fn delete(&self) -> Result<(), Error> {
        adapters::delete(&self.credential.target_name, CredentialType::Generic)
    }
}

impl Deref for GenericCredential {
    type Target = Credential;

    fn deref(&self) -> &Credential {
        &self.credential
    }
}

impl DerefMut for GenericCredential {
    fn deref_mut(&mut self) -> &mut Credential {
        &mut self.credential
    }
}

/// A domain password credential, consumed by Windows authentication
/// packages for login to the target host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPassword {
    /// The underlying credential value
    pub credential: Credential,
}

impl DomainPassword {
    /// Creates a new domain password for login to the given target host.
    ///
    /// Persistence defaults to `LocalMachine`. The credential is not yet
    /// stored in the vault; call [`Self::write`] to persist it.
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            credential: Credential {
                target_name: target_name.into(),
                persist: Persist::LocalMachine,
                ..Credential::default()
            },
        }
    }

    /// Fetches the domain password for the given target host from the
    /// vault.
    ///
    /// The OS withholds the actual password data for this credential type;
    /// the blob of the returned credential is empty.
    pub fn get(target_name: &str) -> Result<Self, Error> {
        adapters::read(target_name, CredentialType::DomainPassword)
            .map(|credential| Self { credential })
    }

    /// Persists the credential to the vault.
    ///
    /// Fails with [`Error::BadUsername`] when no user name is set.
    pub fn write(&self) -> Result<(), Error> {
        adapters::write(&self.credential, CredentialType::DomainPassword)
    }

    /// Removes the credential from the vault.
    pub fn delete(&self) -> Result<(), Error> {
        adapters::delete(&self.credential.target_name, CredentialType::DomainPassword)
    }

    /// Stores a password in the credential blob.
    ///
    /// Domain passwords carry the UTF-16LE bytes of the NUL-terminated
    /// password string; this mirrors what the Windows login components
    /// expect to find.
    pub fn set_password(&mut self, password: &str) {
        self.credential.credential_blob = codec::wide_to_bytes(&codec::encode_wide(password));
    }
}

impl Deref for DomainPassword {
    type Target = Credential;

    fn deref(&self) -> &Credential {
        &self.credential
    }
}

impl DerefMut for DomainPassword {
    fn deref_mut(&mut self) -> &mut Credential {
        &mut self.credential
    }
}

/// Lists every credential in the vault.
///
/// An empty vault yields an empty list, not an error.
pub fn list() -> Result<Vec<Credential>, Error> {
    adapters::enumerate("", true)
}

/// Lists the credentials whose target name matches the given filter.
///
/// The filter is a prefix followed by an asterisk, e.g. `"TERMSRV/*"`.
/// A filter matching nothing yields an empty list, not an error.
pub fn filtered_list(filter: &str) -> Result<Vec<Credential>, Error> {
    adapters::enumerate(filter, false)
}
