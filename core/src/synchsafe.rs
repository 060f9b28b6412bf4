//! synchsafe.rs
//! The 28-bit "synchsafe" integer used for every size field in ID3v2.
//!
//! Layout (most significant byte first):
//!
//! ```text
//! byte:   0        1        2        3
//! bits: 0xxxxxxx 0xxxxxxx 0xxxxxxx 0xxxxxxx
//!        27..21   20..14   13..7    6..0
//! ```
//!
//! Decode and encode are the two halves of one bijection and share the same
//! mask and shift table, so the two directions cannot drift apart.

use thiserror::Error;

use crate::constants::{SYNCHSAFE_BITS_PER_BYTE, SYNCHSAFE_BYTE_MASK, SYNCHSAFE_LEN, SYNCHSAFE_MAX};

/// Bit offset of each byte's 7-bit group, indexed by byte position.
const SHIFTS: [u32; SYNCHSAFE_LEN] = [
    3 * SYNCHSAFE_BITS_PER_BYTE,
    2 * SYNCHSAFE_BITS_PER_BYTE,
    SYNCHSAFE_BITS_PER_BYTE,
    0,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynchsafeError {
    /// Input slice is not exactly four bytes long.
    #[error("synchsafe integer must be {need} bytes, got {have}")]
    InvalidLength { have: usize, need: usize },

    /// Value needs more than 28 bits.
    #[error("value {value} does not fit a synchsafe integer (max {max})")]
    OutOfRange { value: u64, max: u32 },
}

/// A value in `[0, 2^28)` that can be written as four synchsafe bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SynchsafeInteger(u32);

impl SynchsafeInteger {
    pub const LEN: usize = SYNCHSAFE_LEN;
    pub const MAX: u32 = SYNCHSAFE_MAX;

    /// Range-checked constructor. Any bit in the top nibble is rejected.
    pub fn new(value: u32) -> Result<Self, SynchsafeError> {
        if value & !SYNCHSAFE_MAX != 0 {
            return Err(SynchsafeError::OutOfRange {
                value: value as u64,
                max: SYNCHSAFE_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Range-checked constructor for lengths computed in memory.
    pub fn from_len(len: usize) -> Result<Self, SynchsafeError> {
        let value = u32::try_from(len).map_err(|_| SynchsafeError::OutOfRange {
            value: len as u64,
            max: SYNCHSAFE_MAX,
        })?;
        Self::new(value)
    }

    /// Decode exactly four wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, SynchsafeError> {
        let array: [u8; SYNCHSAFE_LEN] =
            bytes.try_into().map_err(|_| SynchsafeError::InvalidLength {
                have: bytes.len(),
                need: SYNCHSAFE_LEN,
            })?;
        Ok(Self::from_bytes(array))
    }

    /// Decode a fixed-size array. The high bit of every byte is ignored.
    pub fn from_bytes(bytes: [u8; SYNCHSAFE_LEN]) -> Self {
        let value = bytes
            .iter()
            .zip(SHIFTS)
            .fold(0u32, |acc, (&b, shift)| {
                acc | (u32::from(b & SYNCHSAFE_BYTE_MASK) << shift)
            });
        Self(value)
    }

    /// Encode to wire bytes. Infallible: the range was checked on construction.
    pub fn to_bytes(self) -> [u8; SYNCHSAFE_LEN] {
        SHIFTS.map(|shift| ((self.0 >> shift) as u8) & SYNCHSAFE_BYTE_MASK)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<SynchsafeInteger> for u32 {
    fn from(v: SynchsafeInteger) -> Self {
        v.0
    }
}

impl TryFrom<u32> for SynchsafeInteger {
    type Error = SynchsafeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Decode four synchsafe bytes into a plain integer.
pub fn decode(bytes: &[u8]) -> Result<u32, SynchsafeError> {
    SynchsafeInteger::decode(bytes).map(SynchsafeInteger::value)
}

/// Encode an integer below 2^28 into four synchsafe bytes.
pub fn encode(value: u32) -> Result<[u8; SYNCHSAFE_LEN], SynchsafeError> {
    SynchsafeInteger::new(value).map(SynchsafeInteger::to_bytes)
}
