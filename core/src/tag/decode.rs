use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;

use tracing::debug;

use crate::framing::{decode_frame_with, is_padding, FlagPolicy, Frame, FrameError};
use crate::headers::{decode_tag_header, HeaderError, TagHeader};
use crate::io::read_tag_region;
use crate::tag::types::Tag;
use crate::types::TagError;

/// Lazy walk over the frames of a tag body.
///
/// Stops at the first padding byte or at the end of the body. After an
/// error it yields nothing more. It borrows the body, so a fresh call to
/// [`frames`] always restarts from offset 0.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    body: &'a [u8],
    offset: usize,
    policy: FlagPolicy,
    done: bool,
}

impl<'a> FrameIter<'a> {
    /// Bytes consumed by the frames yielded so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not covered by frames. Once the iterator is exhausted this is
    /// the padding length.
    pub fn remaining(&self) -> usize {
        self.body.len().saturating_sub(self.offset)
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.body.len() || is_padding(self.body, self.offset) {
            self.done = true;
            return None;
        }

        match decode_frame_with(self.body, self.offset, self.policy) {
            Ok((frame, consumed)) => {
                self.offset += consumed;
                Some(Ok(frame))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for FrameIter<'_> {}

/// Walk `body` with the lenient flag policy.
pub fn frames(body: &[u8]) -> FrameIter<'_> {
    frames_with(body, FlagPolicy::default())
}

pub fn frames_with(body: &[u8], policy: FlagPolicy) -> FrameIter<'_> {
    FrameIter {
        body,
        offset: 0,
        policy,
        done: false,
    }
}

/// Fold every frame of `body` into a [`Tag`]. Later duplicates win.
///
/// One malformed frame fails the whole body.
pub fn decode_tag_body(body: &[u8]) -> Result<Tag, FrameError> {
    decode_tag_body_with(body, FlagPolicy::default())
}

pub fn decode_tag_body_with(body: &[u8], policy: FlagPolicy) -> Result<Tag, FrameError> {
    frames_with(body, policy).collect()
}

/// Decode a tag held entirely in memory. `buf` may continue past the tag
/// region; those bytes are ignored.
pub fn decode_tag(buf: &[u8], policy: FlagPolicy) -> Result<(TagHeader, Tag), TagError> {
    let header = decode_tag_header(buf)?;
    let body = buf
        .get(TagHeader::LEN..header.region_len())
        .ok_or(HeaderError::BufferTooShort {
            have: buf.len(),
            need: header.region_len(),
        })?;
    let tag = decode_tag_body_with(body, policy)?;
    Ok((header, tag))
}

/// Read and decode the tag at the current position of `reader`.
///
/// Consumes exactly the tag region (10 + declared body size bytes), leaving
/// the reader at the first payload byte.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<(TagHeader, Tag), TagError> {
    read_tag_with(reader, FlagPolicy::default())
}

pub fn read_tag_with<R: Read>(
    reader: &mut R,
    policy: FlagPolicy,
) -> Result<(TagHeader, Tag), TagError> {
    let (header, body) = read_tag_region(reader)?;
    let tag = decode_tag_body_with(&body, policy)?;
    debug!(
        body_size = header.body_len(),
        frames = tag.len(),
        "read tag"
    );
    Ok((header, tag))
}

/// Open `path` and decode the tag at its start.
pub fn read_tag_from_path(
    path: impl AsRef<Path>,
    policy: FlagPolicy,
) -> Result<(TagHeader, Tag), TagError> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    read_tag_with(&mut reader, policy)
}
