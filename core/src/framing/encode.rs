use crate::constants::{ENCODING_UTF8, TEXT_FRAME_OVERHEAD, TEXT_TERMINATOR};
use crate::framing::types::{Frame, FrameError, FrameHeader, FrameId};
use crate::synchsafe::SynchsafeInteger;

/// Encode a text frame into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ id (4) ]
/// [ synchsafe size (4) ]   = text length + 2
/// [ flags (2) ]            always zero
/// [ encoding marker (1) ]  0x03, UTF-8
/// [ text (N) ]
/// [ terminator (1) ]       0x00
/// ```
pub fn encode_frame(frame: &Frame) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::with_capacity(FrameHeader::LEN + TEXT_FRAME_OVERHEAD + frame.value.len());
    write_text_frame(&frame.id, &frame.value, &mut out)?;
    Ok(out)
}

/// Append the wire form of `(id, value)` to `out`. Returns the number of
/// bytes written. On error nothing is appended.
pub fn write_text_frame(id: &FrameId, value: &str, out: &mut Vec<u8>) -> Result<usize, FrameError> {
    let text = value.as_bytes();
    let size = SynchsafeInteger::from_len(text.len() + TEXT_FRAME_OVERHEAD)?;
    let start = out.len();

    // --- Header ---
    out.extend_from_slice(id.as_bytes());
    out.extend_from_slice(&size.to_bytes());
    out.extend_from_slice(&[0, 0]); // flags

    // --- Body ---
    out.push(ENCODING_UTF8);
    out.extend_from_slice(text);
    out.push(TEXT_TERMINATOR);

    let written = out.len() - start;
    debug_assert_eq!(written, FrameHeader::LEN + size.as_usize());

    Ok(written)
}

/// Convenience: validate `id` and encode `(id, value)` in one step.
pub fn encode_text_frame(id: &str, value: &str) -> Result<Vec<u8>, FrameError> {
    encode_frame(&Frame::new(id, value)?)
}
