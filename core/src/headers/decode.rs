//! headers/decode.rs
//!
//! Header decoding utilities.
//!
//! Design notes:
//! - Reads the first 10 bytes of a buffer; anything after them is ignored.
//! - Magic is checked before the version, the version before the flags.

use crate::constants::TAG_MAGIC;
use crate::headers::types::{HeaderError, TagHeader};
use crate::synchsafe::SynchsafeInteger;

/// Decode and validate a tag header.
///
/// # Errors
/// - `BufferTooShort` if `buf` holds fewer than 10 bytes.
/// - `InvalidMagic` if `buf` does not start with "ID3".
/// - `UnsupportedVersion` if the major version is not 4.
/// - `UnsupportedFeature` for the first defined flag bit that is set.
pub fn decode_tag_header(buf: &[u8]) -> Result<TagHeader, HeaderError> {
    if buf.len() < TagHeader::LEN {
        return Err(HeaderError::BufferTooShort {
            have: buf.len(),
            need: TagHeader::LEN,
        });
    }

    let mut magic = [0u8; 3];
    magic.copy_from_slice(&buf[0..3]);
    if magic != TAG_MAGIC {
        return Err(HeaderError::InvalidMagic {
            have: magic,
            need: TAG_MAGIC,
        });
    }

    let h = TagHeader {
        major: buf[3],
        minor: buf[4],
        flags: buf[5],
        body_size: SynchsafeInteger::decode(&buf[6..10])?,
    };

    h.validate()?;

    Ok(h)
}
