//! headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Serializes `TagHeader` into a fixed 10-byte buffer.
//! - Field order must match `decode.rs` exactly.
//! - Validation runs before encoding, so a header this codec would refuse to
//!   read is never written.

use crate::constants::TAG_MAGIC;
use crate::headers::types::{HeaderError, TagHeader};
use crate::synchsafe::SynchsafeInteger;

/// Serialize a `TagHeader` into its 10-byte wire form.
///
/// # Returns
/// - `Ok([u8; 10])` containing the encoded header bytes.
/// - `Err(HeaderError)` if the header fails `validate()`.
pub fn encode_tag_header(h: &TagHeader) -> Result<[u8; TagHeader::LEN], HeaderError> {
    h.validate()?;

    let mut out = [0u8; TagHeader::LEN];
    out[0..3].copy_from_slice(&TAG_MAGIC); // 0..3  file identifier
    out[3] = h.major;                      // 3     major version
    out[4] = h.minor;                      // 4     minor version
    out[5] = h.flags;                      // 5     flags
    out[6..10].copy_from_slice(&h.body_size.to_bytes()); // 6..10 body size

    Ok(out)
}

/// Canonical header for a body of `body_len` bytes.
///
/// Fails with `HeaderError::Size` when the body does not fit in 28 bits.
pub fn encode_header_for_body(body_len: usize) -> Result<[u8; TagHeader::LEN], HeaderError> {
    let size = SynchsafeInteger::from_len(body_len)?;
    encode_tag_header(&TagHeader::new(size))
}
