use std::fmt;
use std::str::{FromStr, Utf8Error};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{FRAME_HEADER_LEN, FRAME_ID_LEN};
use crate::synchsafe::{SynchsafeError, SynchsafeInteger};
use crate::utils::fmt_bytes;

/// Four-character frame identifier, e.g. `TIT2`.
///
/// Only the shape is checked (four ASCII bytes, none of them NUL); whether
/// the code is one the ID3 standard defines is not. Unknown codes round-trip.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId([u8; FRAME_ID_LEN]);

impl FrameId {
    pub const LEN: usize = FRAME_ID_LEN;

    /// Build an identifier from caller-supplied text.
    pub fn new(id: &str) -> Result<Self, FrameError> {
        let raw: [u8; FRAME_ID_LEN] = id
            .as_bytes()
            .try_into()
            .map_err(|_| FrameError::InvalidId { id: id.to_owned() })?;
        if !Self::is_well_formed(&raw) {
            return Err(FrameError::InvalidId { id: id.to_owned() });
        }
        Ok(Self(raw))
    }

    /// Compile-time identifier for tables. Panics (at compile time, when used
    /// in a `const`) if `raw` is not well formed.
    pub const fn from_static(raw: [u8; FRAME_ID_LEN]) -> Self {
        let mut i = 0;
        while i < FRAME_ID_LEN {
            assert!(raw[i].is_ascii() && raw[i] != 0, "frame id must be ASCII without NUL");
            i += 1;
        }
        Self(raw)
    }

    /// Build an identifier from the four bytes at the start of a frame.
    pub fn from_wire(raw: [u8; FRAME_ID_LEN]) -> Result<Self, FrameError> {
        if !Self::is_well_formed(&raw) {
            return Err(FrameError::NonAsciiId { raw });
        }
        Ok(Self(raw))
    }

    // A leading NUL would read back as padding, so NUL is refused anywhere.
    fn is_well_formed(raw: &[u8; FRAME_ID_LEN]) -> bool {
        raw.iter().all(|&b| b.is_ascii() && b != 0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAME_ID_LEN] {
        &self.0
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // ASCII is checked on construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({:?})", self.as_str())
    }
}

impl FromStr for FrameId {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FrameId {
    type Error = FrameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

/// One text frame: identifier plus its decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: FrameId,
    pub value: String,
}

impl Frame {
    pub fn new(id: &str, value: impl Into<String>) -> Result<Self, FrameError> {
        Ok(Self {
            id: FrameId::new(id)?,
            value: value.into(),
        })
    }
}

/// Frame header (fixed size, big-endian).
///
/// ```text
/// [ id (4) ][ synchsafe size (4) ][ flags (2) ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub id: FrameId,
    /// Content length: encoding marker + text + terminator.
    pub size: SynchsafeInteger,
    /// Status byte in the high half, format byte in the low half.
    pub flags: u16,
}

impl FrameHeader {
    pub const LEN: usize = FRAME_HEADER_LEN;

    #[inline]
    pub fn content_len(&self) -> usize {
        self.size.as_usize()
    }

    /// Bytes occupied on the wire, header included.
    #[inline]
    pub fn total_len(&self) -> usize {
        Self::LEN + self.content_len()
    }
}

/// How frame-level flag bytes are screened on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagPolicy {
    /// Reject only when BOTH flag bytes are non-zero. A frame with a single
    /// non-zero flag byte is decoded as if it had none.
    #[default]
    Lenient,
    /// Reject any non-zero flag byte.
    Strict,
}

impl FlagPolicy {
    pub fn accepts(self, flags: u16) -> bool {
        let [status, format] = flags.to_be_bytes();
        match self {
            FlagPolicy::Lenient => status == 0 || format == 0,
            FlagPolicy::Strict => status == 0 && format == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Header or content runs past the end of the buffer.
    #[error("truncated frame at offset {offset}: need {need} bytes, {have} available")]
    Truncated { offset: usize, need: usize, have: usize },

    /// Caller-supplied identifier is not four ASCII characters.
    #[error("invalid frame id {id:?}: must be exactly {} ASCII characters", FRAME_ID_LEN)]
    InvalidId { id: String },

    /// Identifier bytes read from the wire are not ASCII.
    #[error("invalid frame id on the wire: {}", fmt_bytes(.raw))]
    NonAsciiId { raw: [u8; FRAME_ID_LEN] },

    #[error("frame flags are not supported (frame: {id}, flags: 0x{flags:04x})")]
    UnsupportedFlags { id: FrameId, flags: u16 },

    /// Declared size is zero, so there is no encoding marker.
    #[error("frame {id} has no content")]
    MissingEncoding { id: FrameId },

    #[error("unsupported text encoding 0x{raw:02x} in frame {id}, only UTF-8 is supported")]
    UnsupportedEncoding { id: FrameId, raw: u8 },

    #[error("frame {id} text is not valid UTF-8: {source}")]
    InvalidText {
        id: FrameId,
        #[source]
        source: Utf8Error,
    },

    #[error("frame size: {0}")]
    Size(#[from] SynchsafeError),
}
