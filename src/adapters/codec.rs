//! Wide-string codec for the native credential API
//!
//! The Credential Manager speaks NUL-terminated UTF-16, while enumeration
//! results hand back raw buffers that may lack a terminator entirely. This
//! module owns both directions of that conversion plus the byte-level
//! helpers the marshaling layer builds on. All pointer-taking functions
//! copy into owned storage; nothing here retains foreign memory.

/// Encodes a string as UTF-16 code units with a terminating NUL.
///
/// An empty string still yields a buffer containing only the terminator,
/// so the resulting pointer is never null.
pub fn encode_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decodes a NUL-terminated UTF-16 buffer into a `String`.
///
/// A null pointer decodes to the empty string. Unpaired surrogates are
/// replaced rather than rejected; the vault stores whatever an application
/// wrote and decoding must not fail on foreign data.
///
/// # Safety
/// `ptr` must either be null or point to a readable buffer that contains a
/// zero code unit within its bounds.
pub unsafe fn decode_wide_nul(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let mut len = 0usize;
    while *ptr.add(len) != 0 {
        len += 1;
    }
    decode_wide_sized(ptr, len)
}

/// Decodes exactly `len` UTF-16 code units into a `String`.
///
/// Used for enumeration buffers whose length is known up front and which
/// may contain embedded NULs or no terminator at all. A null pointer
/// decodes to the empty string regardless of `len`.
///
/// # Safety
/// `ptr` must either be null or point to at least `len` readable code units.
pub unsafe fn decode_wide_sized(ptr: *const u16, len: usize) -> String {
    if ptr.is_null() || len == 0 {
        return String::new();
    }
    let units = std::slice::from_raw_parts(ptr, len);
    String::from_utf16_lossy(units)
}

/// Expands UTF-16 code units into bytes, little-endian, low byte first.
///
/// This is the byte form the vault expects when a wide string is stored in
/// an opaque blob field (e.g. a domain password). Empty input yields an
/// empty vector.
pub fn wide_to_bytes(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 2);
    for unit in units {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Copies `len` bytes from foreign memory into an owned vector.
///
/// A null pointer yields an empty vector for any `len`; the API reports
/// null together with a zero size for absent blobs, and this guards the
/// cases where only the pointer is null.
///
/// # Safety
/// `ptr` must either be null or point to at least `len` readable bytes.
pub unsafe fn copy_foreign_bytes(ptr: *const u8, len: usize) -> Vec<u8> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len).to_vec()
}
