use tracing::trace;

use crate::framing::{write_text_frame, FrameError};
use crate::headers::encode_header_for_body;
use crate::tag::types::Tag;
use crate::types::TagError;

/// Concatenate the wire form of every frame, in the tag's iteration order.
pub fn encode_tag_body(tag: &Tag) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::new();
    for (id, value) in tag.iter() {
        let n = write_text_frame(id, value, &mut out)?;
        trace!(%id, len = n, "encoded frame");
    }
    Ok(out)
}

/// Serialize a full tag: 10-byte header followed by the frames.
///
/// The header's size field is recomputed from the encoded body. No padding
/// is written, so the result is exactly `10 + body length` bytes.
pub fn encode_tag(tag: &Tag) -> Result<Vec<u8>, TagError> {
    let body = encode_tag_body(tag)?;
    let header = encode_header_for_body(body.len())?;

    let mut out = Vec::with_capacity(header.len() + body.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(&body);
    Ok(out)
}
