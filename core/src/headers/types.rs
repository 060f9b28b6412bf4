//! headers/types.rs
//! Tag header struct and its error type.

use thiserror::Error;

use crate::constants::{tag_flags, TAG_HEADER_LEN, TAG_MAJOR_VERSION, TAG_MINOR_VERSION};
use crate::synchsafe::{SynchsafeError, SynchsafeInteger};
use crate::types::UnsupportedFeature;
use crate::utils::fmt_bytes;

/// Decoded tag header.
///
/// ```text
/// [ "ID3" (3) ][ major (1) ][ minor (1) ][ flags (1) ][ synchsafe body size (4) ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub major: u8,
    pub minor: u8,
    pub flags: u8,
    /// Body length in bytes, header excluded, padding included.
    pub body_size: SynchsafeInteger,
}

impl TagHeader {
    pub const LEN: usize = TAG_HEADER_LEN;

    /// Canonical header written by this codec: v2.4.0, no flags.
    pub fn new(body_size: SynchsafeInteger) -> Self {
        Self {
            major: TAG_MAJOR_VERSION,
            minor: TAG_MINOR_VERSION,
            flags: 0,
            body_size,
        }
    }

    /// Declared body length.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body_size.as_usize()
    }

    /// Length of the whole raw tag region (header + body). Everything past
    /// this offset in a file is audio payload.
    #[inline]
    pub fn region_len(&self) -> usize {
        Self::LEN + self.body_len()
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.major != TAG_MAJOR_VERSION {
            return Err(HeaderError::UnsupportedVersion { major: self.major });
        }

        // Order matters: the first set bit is the one reported.
        let checks = [
            (tag_flags::UNSYNCHRONISATION, UnsupportedFeature::Unsynchronisation),
            (tag_flags::EXTENDED_HEADER, UnsupportedFeature::ExtendedHeader),
            (tag_flags::EXPERIMENTAL, UnsupportedFeature::Experimental),
            (tag_flags::FOOTER, UnsupportedFeature::Footer),
        ];
        for (bit, feature) in checks {
            if self.flags & bit != 0 {
                return Err(HeaderError::UnsupportedFeature(feature));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Fewer than 10 bytes available.
    #[error("tag header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Bytes 0..3 are not "ID3".
    #[error("not an ID3v2 tag: expected {}, got {}", fmt_bytes(.need), fmt_bytes(.have))]
    InvalidMagic { have: [u8; 3], need: [u8; 3] },

    /// Major version other than 4.
    #[error("unsupported tag version 2.{major}, only 2.4 is supported")]
    UnsupportedVersion { major: u8 },

    /// One of the defined header flag bits is set.
    #[error("unsupported tag feature: {0}")]
    UnsupportedFeature(UnsupportedFeature),

    /// Size field is malformed or out of range.
    #[error("tag size: {0}")]
    Size(#[from] SynchsafeError),
}
