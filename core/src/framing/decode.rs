use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::constants::ENCODING_UTF8;
use crate::framing::types::{FlagPolicy, Frame, FrameError, FrameHeader, FrameId};
use crate::synchsafe::SynchsafeInteger;
use crate::utils::slice_at;

/// True when the byte at `offset` starts the zero padding that ends a tag body.
///
/// A frame identifier never starts with NUL, so callers check this before
/// every `decode_frame` and stop iterating when it holds.
#[inline]
pub fn is_padding(buf: &[u8], offset: usize) -> bool {
    buf.get(offset) == Some(&0)
}

#[inline]
pub fn parse_frame_header(
    buf: &[u8],
    offset: usize,
    policy: FlagPolicy,
) -> Result<FrameHeader, FrameError> {
    let wire = slice_at(buf, offset, FrameHeader::LEN).ok_or(FrameError::Truncated {
        offset,
        need: FrameHeader::LEN,
        have: buf.len().saturating_sub(offset),
    })?;

    // --- fixed offsets ---
    let mut raw = [0u8; FrameId::LEN];
    raw.copy_from_slice(&wire[0..4]);
    let id = FrameId::from_wire(raw)?;

    let size = SynchsafeInteger::decode(&wire[4..8])?;

    let flags = BigEndian::read_u16(&wire[8..10]);
    if !policy.accepts(flags) {
        return Err(FrameError::UnsupportedFlags { id, flags });
    }

    Ok(FrameHeader { id, size, flags })
}

/// Decode a single frame starting at `offset`, using the lenient flag policy.
///
/// Returns the frame and the number of bytes it occupies (10 + declared size).
pub fn decode_frame(buf: &[u8], offset: usize) -> Result<(Frame, usize), FrameError> {
    decode_frame_with(buf, offset, FlagPolicy::default())
}

/// Decode a single frame starting at `offset`.
///
/// Caller guarantees:
/// - `offset` is not padding (see `is_padding`)
pub fn decode_frame_with(
    buf: &[u8],
    offset: usize,
    policy: FlagPolicy,
) -> Result<(Frame, usize), FrameError> {
    let header = parse_frame_header(buf, offset, policy)?;

    let start = offset + FrameHeader::LEN;
    let content = slice_at(buf, start, header.content_len()).ok_or(FrameError::Truncated {
        offset,
        need: header.total_len(),
        have: buf.len().saturating_sub(offset),
    })?;

    let value = decode_text(header.id, content)?;
    trace!(id = %header.id, offset, size = header.content_len(), "decoded frame");

    Ok((Frame { id: header.id, value }, header.total_len()))
}

/// `content` is `[ marker (1) ][ text ][ 0x00 ]`. Trailing NULs (the
/// terminator and any slack inside an oversized frame) are dropped. Inner
/// NULs separate v2.4 multi-value text and are kept. A missing terminator
/// is tolerated.
fn decode_text(id: FrameId, content: &[u8]) -> Result<String, FrameError> {
    let (&marker, rest) = content
        .split_first()
        .ok_or(FrameError::MissingEncoding { id })?;

    if marker != ENCODING_UTF8 {
        return Err(FrameError::UnsupportedEncoding { id, raw: marker });
    }

    let text: &[u8] = match rest.iter().rposition(|&b| b != 0) {
        Some(last) => &rest[..=last],
        None => &[],
    };

    std::str::from_utf8(text)
        .map(str::to_owned)
        .map_err(|source| FrameError::InvalidText { id, source })
}
