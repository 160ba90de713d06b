//! Native credential vault operations
//!
//! Provides a safe Rust interface to the Windows Credential Manager API.
//! This module isolates all unsafe Windows API calls; every operation is a
//! single-shot blocking foreign call with no state kept between calls.
//!
//! Memory discipline: records returned by `CredReadW` and `CredEnumerateW`
//! are owned by the OS allocator and are released through `CredFree`
//! exactly once, on every exit path, after the marshaling layer has copied
//! the data out. Outbound records are owned by the marshaling layer for the
//! duration of the call; the OS never takes ownership of them.

use std::ffi::c_void;

use windows::core::PCWSTR;
use windows::Win32::Security::Credentials::{
    CredDeleteW, CredEnumerateW, CredFree, CredReadW, CredWriteW, CREDENTIALW,
    CRED_ENUMERATE_FLAGS, CRED_TYPE,
};

use super::codec;
use super::marshal::{self, MarshaledCredential, RawCredential};
use crate::core::{Credential, CredentialType};
use crate::errors::Error;

/// Releases an OS-owned credential allocation on scope exit.
///
/// `CredFree` releases the entire allocation it is handed; for enumeration
/// results that includes every record in the array, so sub-records are
/// never freed individually.
struct CredFreeGuard(*const c_void);

impl Drop for CredFreeGuard {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { CredFree(self.0) };
        }
    }
}

/// Reads a single credential from the vault.
///
/// # Arguments
/// * `target_name` - Unique name of the credential within its type namespace
/// * `cred_type` - Credential type to look up
///
/// # Returns
/// * `Ok(credential)` - The stored credential
/// * `Err(Error::ElementNotFound)` - No such credential
/// * `Err(_)` - Classified vault error
pub fn read(target_name: &str, cred_type: CredentialType) -> Result<Credential, Error> {
    tracing::debug!(target_name, cred_type = cred_type.as_raw(), "vault read");

    let target = codec::encode_wide(target_name);
    let mut pcred: *mut CREDENTIALW = std::ptr::null_mut();
    unsafe {
        CredReadW(
            PCWSTR::from_raw(target.as_ptr()),
            CRED_TYPE(cred_type.as_raw()),
            0,
            &mut pcred,
        )
        .map_err(Error::from_win32)?;

        let _guard = CredFreeGuard(pcred as *const c_void);
        marshal::from_raw(pcred as *const RawCredential).ok_or(Error::ElementNotFound)
    }
}

/// Writes a credential to the vault, creating or replacing it.
///
/// The native record built here is owned by this call alone and is released
/// when it returns, success or not.
///
/// # Arguments
/// * `cred` - Credential to persist
/// * `cred_type` - Credential type to store it under
pub fn write(cred: &Credential, cred_type: CredentialType) -> Result<(), Error> {
    // never log the secret itself
    tracing::debug!(
        target_name = %cred.target_name,
        cred_type = cred_type.as_raw(),
        blob_len = cred.credential_blob.len(),
        "vault write"
    );

    let mut marshaled = MarshaledCredential::new(cred);
    marshaled.set_type(cred_type.as_raw());
    unsafe {
        CredWriteW(marshaled.as_ptr() as *const CREDENTIALW, 0).map_err(Error::from_win32)
    }
}

/// Deletes a credential from the vault by target name.
///
/// # Arguments
/// * `target_name` - Unique name of the credential within its type namespace
/// * `cred_type` - Credential type to delete
pub fn delete(target_name: &str, cred_type: CredentialType) -> Result<(), Error> {
    tracing::debug!(target_name, cred_type = cred_type.as_raw(), "vault delete");

    let target = codec::encode_wide(target_name);
    unsafe {
        CredDeleteW(
            PCWSTR::from_raw(target.as_ptr()),
            CRED_TYPE(cred_type.as_raw()),
            0,
        )
        .map_err(Error::from_win32)
    }
}

/// Enumerates credentials in the vault.
///
/// # Arguments
/// * `filter` - Prefix pattern for the target name (e.g. `"TERMSRV/*"`),
///   passed to the OS verbatim
/// * `allow_empty` - When true the filter is ignored and a null filter is
///   passed, enumerating the entire vault
///
/// # Returns
/// Credentials in the order the OS returns them. The "no matches" status is
/// normalized to an empty successful result; any other failure is a
/// classified error.
pub fn enumerate(filter: &str, allow_empty: bool) -> Result<Vec<Credential>, Error> {
    tracing::debug!(filter, allow_empty, "vault enumerate");

    let filter_wide = if allow_empty {
        None
    } else {
        Some(codec::encode_wide(filter))
    };
    let filter_ptr = filter_wide
        .as_ref()
        .map_or(PCWSTR::null(), |f| PCWSTR::from_raw(f.as_ptr()));

    let mut count = 0u32;
    let mut pcredentials: *mut *mut CREDENTIALW = std::ptr::null_mut();
    unsafe {
        match CredEnumerateW(
            filter_ptr,
            CRED_ENUMERATE_FLAGS(0),
            &mut count,
            &mut pcredentials,
        ) {
            Ok(()) => {
                let _guard = CredFreeGuard(pcredentials as *const c_void);
                if pcredentials.is_null() {
                    return Ok(Vec::new());
                }
                let records = std::slice::from_raw_parts(pcredentials, count as usize);
                let credentials = records
                    .iter()
                    .filter_map(|&record| marshal::from_raw(record as *const RawCredential))
                    .collect();
                Ok(credentials)
            }
            Err(err) => match Error::from_win32(err) {
                Error::ElementNotFound => Ok(Vec::new()),
                err => {
                    tracing::error!(code = err.code(), "vault enumerate failed");
                    Err(err)
                }
            },
        }
    }
}
