//! Marshaling between `Credential` values and native `CREDENTIALW` records
//!
//! This module owns both directions of the fixed-layout boundary. Outbound,
//! [`MarshaledCredential`] allocates an entirely independent native record
//! from a `Credential` and keeps every backing buffer alive for the duration
//! of one foreign call. Inbound, [`from_raw`] copies an OS-owned record into
//! a fresh `Credential` without retaining any foreign pointer.
//!
//! The raw mirror types are internal to the adapter layer; callers only
//! ever see `Credential`.

use chrono::{DateTime, Utc};

use super::codec;
use crate::core::{Credential, CredentialAttribute, Persist};

/// 100 ns ticks between 1601-01-01 (FILETIME epoch) and 1970-01-01.
const FILETIME_UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Mirror of the Win32 `FILETIME` structure.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RawFiletime {
    pub low: u32,
    pub high: u32,
}

impl RawFiletime {
    /// Converts a host timestamp to 100 ns ticks since 1601-01-01.
    pub fn from_datetime(when: DateTime<Utc>) -> Self {
        let unix_ticks = when.timestamp() * TICKS_PER_SECOND
            + i64::from(when.timestamp_subsec_nanos() / 100);
        let ticks = (unix_ticks + FILETIME_UNIX_EPOCH_TICKS) as u64;
        Self {
            low: ticks as u32,
            high: (ticks >> 32) as u32,
        }
    }

    /// Converts back to a host timestamp.
    ///
    /// Resolution is the native 100 ns; sub-tick precision does not exist
    /// on the wire. Ticks before the Unix epoch map to pre-1970 timestamps.
    pub fn to_datetime(self) -> DateTime<Utc> {
        let ticks = ((u64::from(self.high) << 32) | u64::from(self.low)) as i64;
        let unix_ticks = ticks - FILETIME_UNIX_EPOCH_TICKS;
        let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
        let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        DateTime::from_timestamp(secs, nanos).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Mirror of `CREDENTIAL_ATTRIBUTEW`: one fixed-layout attribute record.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawCredentialAttribute {
    pub keyword: *const u16,
    pub flags: u32,
    pub value_size: u32,
    pub value: *const u8,
}

/// Mirror of `CREDENTIALW`.
///
/// Field order and widths match the wincred.h layout exactly; a pointer to
/// this struct is what crosses the foreign-call boundary. Invariant: a
/// pointer field is null if and only if the corresponding size or count is
/// zero (text fields excepted, which always point to at least a terminator).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawCredential {
    pub flags: u32,
    pub cred_type: u32,
    pub target_name: *const u16,
    pub comment: *const u16,
    pub last_written: RawFiletime,
    pub blob_size: u32,
    pub blob: *const u8,
    pub persist: u32,
    pub attribute_count: u32,
    pub attributes: *const RawCredentialAttribute,
    pub target_alias: *const u16,
    pub user_name: *const u16,
}

/// An outbound native record together with the buffers that back it.
///
/// Construction copies every field of the source `Credential`, so mutating
/// the source afterwards never changes the record. The record is valid for
/// as long as this value lives; [`Self::as_ptr`] must not outlive it.
pub(crate) struct MarshaledCredential {
    raw: RawCredential,
    _target_name: Vec<u16>,
    _comment: Vec<u16>,
    _target_alias: Vec<u16>,
    _user_name: Vec<u16>,
    _blob: Vec<u8>,
    _attributes: Vec<RawCredentialAttribute>,
    _attribute_keywords: Vec<Vec<u16>>,
    _attribute_values: Vec<Vec<u8>>,
}

impl MarshaledCredential {
    /// Builds a native record from a credential.
    ///
    /// The wire type is left at zero; callers stamp it with
    /// [`Self::set_type`] before handing the record to a write call.
    pub fn new(cred: &Credential) -> Self {
        let target_name = codec::encode_wide(&cred.target_name);
        let comment = codec::encode_wide(&cred.comment);
        let target_alias = codec::encode_wide(&cred.target_alias);
        let user_name = codec::encode_wide(&cred.user_name);

        let blob = cred.credential_blob.clone();
        let (blob_ptr, blob_size) = if blob.is_empty() {
            (std::ptr::null(), 0)
        } else {
            (blob.as_ptr(), blob.len() as u32)
        };

        let mut attribute_keywords = Vec::with_capacity(cred.attributes.len());
        let mut attribute_values = Vec::with_capacity(cred.attributes.len());
        let mut attributes = Vec::with_capacity(cred.attributes.len());
        for attr in &cred.attributes {
            let keyword = codec::encode_wide(&attr.keyword);
            let value = attr.value.clone();
            let (value_ptr, value_size) = if value.is_empty() {
                (std::ptr::null(), 0)
            } else {
                (value.as_ptr(), value.len() as u32)
            };
            attributes.push(RawCredentialAttribute {
                keyword: keyword.as_ptr(),
                flags: 0,
                value_size,
                value: value_ptr,
            });
            attribute_keywords.push(keyword);
            attribute_values.push(value);
        }
        let (attributes_ptr, attribute_count) = if attributes.is_empty() {
            (std::ptr::null(), 0)
        } else {
            (attributes.as_ptr(), attributes.len() as u32)
        };

        let raw = RawCredential {
            flags: 0,
            cred_type: 0,
            target_name: target_name.as_ptr(),
            comment: comment.as_ptr(),
            last_written: RawFiletime::from_datetime(cred.last_written),
            blob_size,
            blob: blob_ptr,
            persist: cred.persist.as_raw(),
            attribute_count,
            attributes: attributes_ptr,
            target_alias: target_alias.as_ptr(),
            user_name: user_name.as_ptr(),
        };

        Self {
            raw,
            _target_name: target_name,
            _comment: comment,
            _target_alias: target_alias,
            _user_name: user_name,
            _blob: blob,
            _attributes: attributes,
            _attribute_keywords: attribute_keywords,
            _attribute_values: attribute_values,
        }
    }

    /// Stamps the wire credential type before a write call.
    pub fn set_type(&mut self, raw_type: u32) {
        self.raw.cred_type = raw_type;
    }

    /// Raw record pointer, valid while `self` is alive.
    pub fn as_ptr(&self) -> *const RawCredential {
        &self.raw
    }
}

/// Copies a native record into a host `Credential`.
///
/// A null pointer yields `None` without fault. All text decodes by
/// terminator scan; the blob and attribute values copy out as owned byte
/// vectors. Null blob or attribute pointers decode to empty vectors, never
/// to a distinct "absent" state: the native layer cannot represent that
/// distinction, so the host side does not either.
///
/// # Safety
/// `ptr` must either be null or point to a well-formed record whose inner
/// pointers satisfy the layout invariants above, and the record must stay
/// valid for the duration of the call.
pub(crate) unsafe fn from_raw(ptr: *const RawCredential) -> Option<Credential> {
    if ptr.is_null() {
        return None;
    }
    let raw = &*ptr;

    let attributes = if raw.attributes.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(raw.attributes, raw.attribute_count as usize)
            .iter()
            .map(|attr| CredentialAttribute {
                keyword: codec::decode_wide_nul(attr.keyword),
                value: codec::copy_foreign_bytes(attr.value, attr.value_size as usize),
            })
            .collect()
    };

    Some(Credential {
        target_name: codec::decode_wide_nul(raw.target_name),
        comment: codec::decode_wide_nul(raw.comment),
        last_written: raw.last_written.to_datetime(),
        target_alias: codec::decode_wide_nul(raw.target_alias),
        user_name: codec::decode_wide_nul(raw.user_name),
        persist: Persist::from_raw(raw.persist),
        credential_blob: codec::copy_foreign_bytes(raw.blob, raw.blob_size as usize),
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixture_credential() -> Credential {
        Credential {
            target_name: "Foo".to_string(),
            comment: "Bar".to_string(),
            // whole 100 ns ticks; the wire cannot carry finer precision
            last_written: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_700),
            target_alias: "MyAlias".to_string(),
            user_name: "Nobody".to_string(),
            persist: Persist::LocalMachine,
            credential_blob: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_roundtrip_reproduces_every_field() {
        let cred = fixture_credential();
        let marshaled = MarshaledCredential::new(&cred);
        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();

        assert_eq!(result.target_name, cred.target_name);
        assert_eq!(result.comment, cred.comment);
        assert_eq!(result.last_written, cred.last_written);
        assert_eq!(result.target_alias, cred.target_alias);
        assert_eq!(result.user_name, cred.user_name);
        assert_eq!(result.persist, cred.persist);
    }

    #[test]
    fn test_record_is_independent_of_source_mutation() {
        let mut cred = fixture_credential();
        cred.credential_blob = vec![1, 2, 3];
        let marshaled = MarshaledCredential::new(&cred);

        cred.target_name = "Another Foo".to_string();
        cred.credential_blob[0] = 99;

        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();
        assert_eq!(result.target_name, "Foo");
        assert_eq!(result.credential_blob, vec![1, 2, 3]);
    }

    #[test]
    fn test_two_records_share_no_memory() {
        let cred = fixture_credential();
        let first = MarshaledCredential::new(&cred);
        let second = MarshaledCredential::new(&cred);
        assert_ne!(first.raw.target_name, second.raw.target_name);
        assert_ne!(first.raw.comment, second.raw.comment);
        assert_ne!(first.raw.user_name, second.raw.user_name);
    }

    #[test]
    fn test_from_raw_null_record() {
        let result = unsafe { from_raw(std::ptr::null()) };
        assert!(result.is_none());
    }

    #[test]
    fn test_text_fields_always_allocate() {
        // empty strings still get a terminator-only buffer, never null
        let marshaled = MarshaledCredential::new(&Credential::default());
        assert!(!marshaled.raw.target_name.is_null());
        assert!(!marshaled.raw.comment.is_null());
        assert!(!marshaled.raw.target_alias.is_null());
        assert!(!marshaled.raw.user_name.is_null());
    }

    #[test]
    fn test_blob_marshaling() {
        let cred = Credential {
            credential_blob: vec![1, 2, 3],
            ..Credential::default()
        };
        let marshaled = MarshaledCredential::new(&cred);
        assert_eq!(marshaled.raw.blob_size, 3);
        assert!(!marshaled.raw.blob.is_null());

        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();
        assert_eq!(result.credential_blob, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_blob_marshals_to_null() {
        let marshaled = MarshaledCredential::new(&Credential::default());
        assert!(marshaled.raw.blob.is_null());
        assert_eq!(marshaled.raw.blob_size, 0);

        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();
        assert!(result.credential_blob.is_empty());
    }

    #[test]
    fn test_attributes_roundtrip_in_order() {
        let cred = Credential {
            attributes: vec![
                CredentialAttribute {
                    keyword: "Foo".to_string(),
                    value: vec![1, 2, 3],
                },
                CredentialAttribute {
                    keyword: "Bar".to_string(),
                    value: Vec::new(),
                },
            ],
            ..Credential::default()
        };
        let marshaled = MarshaledCredential::new(&cred);
        assert_eq!(marshaled.raw.attribute_count, 2);
        assert!(!marshaled.raw.attributes.is_null());

        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();
        assert_eq!(result.attributes, cred.attributes);
    }

    #[test]
    fn test_empty_attribute_list_marshals_to_null() {
        let marshaled = MarshaledCredential::new(&Credential::default());
        assert!(marshaled.raw.attributes.is_null());
        assert_eq!(marshaled.raw.attribute_count, 0);

        let result = unsafe { from_raw(marshaled.as_ptr()) }.unwrap();
        assert!(result.attributes.is_empty());
    }

    #[test]
    fn test_empty_attribute_value_marshals_to_null() {
        let cred = Credential {
            attributes: vec![CredentialAttribute {
                keyword: "empty".to_string(),
                value: Vec::new(),
            }],
            ..Credential::default()
        };
        let marshaled = MarshaledCredential::new(&cred);
        let attr = unsafe { &*marshaled.raw.attributes };
        assert!(attr.value.is_null());
        assert_eq!(attr.value_size, 0);
    }

    #[test]
    fn test_set_type_stamps_wire_type() {
        let mut marshaled = MarshaledCredential::new(&Credential::default());
        assert_eq!(marshaled.raw.cred_type, 0);
        marshaled.set_type(2);
        assert_eq!(marshaled.raw.cred_type, 2);
    }

    #[test]
    fn test_filetime_roundtrip_at_tick_resolution() {
        let when = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(9_999_900);
        let filetime = RawFiletime::from_datetime(when);
        assert_eq!(filetime.to_datetime(), when);
    }

    #[test]
    fn test_filetime_truncates_sub_tick_precision() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let when = base + chrono::Duration::nanoseconds(150);
        let filetime = RawFiletime::from_datetime(when);
        // 150 ns rounds down to one 100 ns tick
        assert_eq!(
            filetime.to_datetime(),
            base + chrono::Duration::nanoseconds(100)
        );
    }

    #[test]
    fn test_filetime_unix_epoch() {
        let filetime = RawFiletime::from_datetime(DateTime::<Utc>::UNIX_EPOCH);
        let ticks = (u64::from(filetime.high) << 32) | u64::from(filetime.low);
        assert_eq!(ticks, FILETIME_UNIX_EPOCH_TICKS as u64);
        assert_eq!(filetime.to_datetime(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_filetime_zero_is_before_unix_epoch() {
        // tick zero is 1601-01-01, which must not panic on conversion
        let when = RawFiletime::default().to_datetime();
        assert_eq!(when, Utc.with_ymd_and_hms(1601, 1, 1, 0, 0, 0).unwrap());
    }
}
