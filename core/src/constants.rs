//! constants.rs
//! Wire constants for the ID3v2.4 tag layout.
//!
//! All multi-byte fields on the wire are big-endian.

/// File identifier at offset 0 of every tag.
// Typed as `[u8; 3]` so the field length is enforced by the type itself.
pub const TAG_MAGIC: [u8; 3] = *b"ID3";

/// The only major version this codec reads or writes.
pub const TAG_MAJOR_VERSION: u8 = 4;
/// Minor (revision) version emitted on write. Ignored on read.
pub const TAG_MINOR_VERSION: u8 = 0;

/// Tag header: magic (3) + major (1) + minor (1) + flags (1) + size (4).
pub const TAG_HEADER_LEN: usize = 10;
/// Frame header: id (4) + size (4) + flags (2).
pub const FRAME_HEADER_LEN: usize = 10;
/// Frame identifiers are always four ASCII bytes.
pub const FRAME_ID_LEN: usize = 4;

/// Synchsafe integers carry 7 payload bits per byte.
pub const SYNCHSAFE_LEN: usize = 4;
pub const SYNCHSAFE_BITS_PER_BYTE: u32 = 7;
pub const SYNCHSAFE_BYTE_MASK: u8 = 0x7F;
/// Largest value a 4-byte synchsafe integer can hold (2^28 - 1).
pub const SYNCHSAFE_MAX: u32 = (1 << 28) - 1;

/// Text encoding marker for UTF-8 (ID3v2.4 $03). The only one supported.
pub const ENCODING_UTF8: u8 = 0x03;
/// Terminator written after every text value.
pub const TEXT_TERMINATOR: u8 = 0x00;
/// Marker byte + terminator byte that wrap the text of every frame.
pub const TEXT_FRAME_OVERHEAD: usize = 2;

/// Tag header flag bits (byte 5).
pub mod tag_flags {
    pub const UNSYNCHRONISATION: u8 = 0x80;
    pub const EXTENDED_HEADER: u8   = 0x40;
    pub const EXPERIMENTAL: u8      = 0x20;
    pub const FOOTER: u8            = 0x10;
}
