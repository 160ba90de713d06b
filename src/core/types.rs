//! Core domain types for credvault

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential type as defined by the Windows Credential Manager API.
///
/// The numeric values are part of the OS contract (wincred.h `CRED_TYPE_*`)
/// and must not be renumbered.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CredentialType {
    /// Generic credential, usable by any application
    Generic = 1,
    /// Domain password, consumed by Windows authentication packages
    DomainPassword = 2,
    /// Domain certificate credential
    DomainCertificate = 3,
    /// Domain visible password (legacy .NET Passport)
    DomainVisiblePassword = 4,
    /// Generic certificate credential
    GenericCertificate = 5,
    /// Extended domain credential
    DomainExtended = 6,
}

impl CredentialType {
    /// Returns the raw `CRED_TYPE_*` value for the native call
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Persistence scope of a stored credential (wincred.h `CRED_PERSIST_*`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Persist {
    /// Credential survives only the current logon session
    Session = 1,
    /// Credential is persisted for this machine
    LocalMachine = 2,
    /// Credential roams with the user across the enterprise
    Enterprise = 3,
}

impl Persist {
    /// Returns the raw `CRED_PERSIST_*` value for the native call
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Maps a raw persistence value from a native record.
    ///
    /// Unknown values fall back to `Session`, the weakest scope.
    pub fn from_raw(value: u32) -> Self {
        match value {
            2 => Persist::LocalMachine,
            3 => Persist::Enterprise,
            _ => Persist::Session,
        }
    }
}

/// A single key/value attribute attached to a credential.
///
/// Keywords are unique within one credential; values are opaque byte
/// sequences. Attribute order is preserved through the vault round trip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialAttribute {
    /// Attribute name, unique within the owning credential
    pub keyword: String,
    /// Opaque attribute payload
    pub value: Vec<u8>,
}

/// A credential as seen by the host application.
///
/// This is a plain value type: it shares no memory with any native record
/// and has no lifecycle of its own. Writing it to the vault copies every
/// field into freshly allocated native buffers.
///
/// An empty `credential_blob` or `attributes` list maps to a null pointer
/// on the wire. Credentials read back from the vault therefore never
/// distinguish "absent" from "empty" for these fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Unique name of the credential within its type namespace
    pub target_name: String,
    /// Free-text comment
    pub comment: String,
    /// Time of the last write, set by the OS on every write
    pub last_written: DateTime<Utc>,
    /// Optional alias for the target name
    pub target_alias: String,
    /// User name associated with the credential
    pub user_name: String,
    /// Persistence scope
    pub persist: Persist,
    /// Opaque secret payload
    pub credential_blob: Vec<u8>,
    /// Ordered list of application-defined attributes
    pub attributes: Vec<CredentialAttribute>,
}

impl Default for Credential {
    fn default() -> Self {
        Self {
            target_name: String::new(),
            comment: String::new(),
            last_written: DateTime::<Utc>::UNIX_EPOCH,
            target_alias: String::new(),
            user_name: String::new(),
            persist: Persist::Session,
            credential_blob: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_type_values_match_os_contract() {
        assert_eq!(CredentialType::Generic.as_raw(), 1);
        assert_eq!(CredentialType::DomainPassword.as_raw(), 2);
        assert_eq!(CredentialType::DomainCertificate.as_raw(), 3);
        assert_eq!(CredentialType::DomainVisiblePassword.as_raw(), 4);
        assert_eq!(CredentialType::GenericCertificate.as_raw(), 5);
        assert_eq!(CredentialType::DomainExtended.as_raw(), 6);
    }

    #[test]
    fn test_persist_values_match_os_contract() {
        assert_eq!(Persist::Session.as_raw(), 1);
        assert_eq!(Persist::LocalMachine.as_raw(), 2);
        assert_eq!(Persist::Enterprise.as_raw(), 3);
    }

    #[test]
    fn test_persist_from_raw_roundtrip() {
        for persist in [Persist::Session, Persist::LocalMachine, Persist::Enterprise] {
            assert_eq!(Persist::from_raw(persist.as_raw()), persist);
        }
    }

    #[test]
    fn test_persist_from_raw_unknown_falls_back_to_session() {
        assert_eq!(Persist::from_raw(0), Persist::Session);
        assert_eq!(Persist::from_raw(99), Persist::Session);
    }

    #[test]
    fn test_default_credential_is_empty() {
        let cred = Credential::default();
        assert!(cred.target_name.is_empty());
        assert!(cred.credential_blob.is_empty());
        assert!(cred.attributes.is_empty());
        assert_eq!(cred.persist, Persist::Session);
        assert_eq!(cred.last_written, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_credential_serialization_roundtrip() {
        let cred = Credential {
            target_name: "server01.domain.com".to_string(),
            comment: "backup account".to_string(),
            user_name: "CONTOSO\\svc_backup".to_string(),
            persist: Persist::LocalMachine,
            credential_blob: b"s3cr3t!".to_vec(),
            attributes: vec![CredentialAttribute {
                keyword: "created-by".to_string(),
                value: b"credvault".to_vec(),
            }],
            ..Credential::default()
        };

        let json = serde_json::to_string(&cred).expect("Credential serialization should succeed");
        let loaded: Credential =
            serde_json::from_str(&json).expect("Credential deserialization should succeed");
        assert_eq!(loaded, cred);
    }
}
