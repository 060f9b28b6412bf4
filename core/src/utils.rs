//! utils.rs
//! Small formatting helpers shared by the error types.

/// Render raw bytes for error messages: printable ASCII as a byte string,
/// anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if !b.is_empty() && b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Bounds-checked sub-slice `buf[start..start + len]`.
#[inline]
pub(crate) fn slice_at(buf: &[u8], start: usize, len: usize) -> Option<&[u8]> {
    buf.get(start..start.checked_add(len)?)
}
