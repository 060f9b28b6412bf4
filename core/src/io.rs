//! io.rs
//! Normalized I/O and the streaming tag rewrite.
//!
//! A rewrite only ever holds the tag region in memory. The audio payload
//! behind it is streamed from the source reader to the destination writer.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::framing::FlagPolicy;
use crate::headers::{decode_tag_header, TagHeader};
use crate::tag::{encode_tag, frames_with, Tag};
use crate::telemetry::RewriteReport;
use crate::types::TagError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write>),
    File(PathBuf),
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read>, TagError> {
    let reader: Box<dyn Read> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(BufReader::new(File::open(p)?)),
        InputSource::Memory(b) => Box::new(io::Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer. Files are created or truncated.
pub fn open_output(sink: OutputSink) -> Result<Box<dyn Write>, TagError> {
    let writer: Box<dyn Write> = match sink {
        OutputSink::Writer(w) => w,
        OutputSink::File(p) => Box::new(BufWriter::new(File::create(p)?)),
    };
    Ok(writer)
}

// ================= Tag region =================

/// Read the raw tag region: the 10-byte header and exactly the declared
/// number of body bytes.
///
/// A source that ends early fails with `io::ErrorKind::UnexpectedEof`.
pub fn read_tag_region<R: Read>(reader: &mut R) -> Result<(TagHeader, Vec<u8>), TagError> {
    let mut buf = [0u8; TagHeader::LEN];
    reader.read_exact(&mut buf)?;
    let header = decode_tag_header(&buf)?;

    // `take` + `read_to_end` grows the buffer as data arrives instead of
    // trusting the declared size up front.
    let need = header.body_len();
    let mut body = Vec::new();
    reader.by_ref().take(need as u64).read_to_end(&mut body)?;
    if body.len() != need {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("tag body truncated: declared {} bytes, got {}", need, body.len()),
        )
        .into());
    }

    Ok((header, body))
}

/// Stream every remaining byte of `reader` into `writer`.
pub fn copy_payload<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
) -> Result<u64, TagError> {
    Ok(io::copy(reader, writer)?)
}

// ================= Rewrite =================

/// A decoded, mutated and re-encoded tag, waiting for a destination.
///
/// Splitting the rewrite in two lets callers delay creating the output
/// until the source tag is known to be valid.
pub struct PendingRewrite<R> {
    reader: R,
    old_header: TagHeader,
    encoded: Vec<u8>,
    frames_read: usize,
    frames_written: usize,
    padding_dropped: usize,
}

impl<R> std::fmt::Debug for PendingRewrite<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRewrite")
            .field("old_header", &self.old_header)
            .field("encoded_len", &self.encoded.len())
            .field("frames_read", &self.frames_read)
            .field("frames_written", &self.frames_written)
            .finish()
    }
}

/// Read the tag region from `reader`, apply `mutate` and encode the result.
///
/// On return `reader` sits at the first payload byte.
pub fn prepare_rewrite<R, F>(
    mut reader: R,
    policy: FlagPolicy,
    mutate: F,
) -> Result<PendingRewrite<R>, TagError>
where
    R: Read,
    F: FnOnce(&mut Tag) -> Result<(), TagError>,
{
    let (old_header, body) = read_tag_region(&mut reader)?;

    let mut tag = Tag::new();
    let mut frames_read = 0usize;
    let mut iter = frames_with(&body, policy);
    for frame in iter.by_ref() {
        let frame = frame?;
        tag.insert(frame.id, frame.value);
        frames_read += 1;
    }
    let padding_dropped = iter.remaining();

    mutate(&mut tag)?;

    let encoded = encode_tag(&tag)?;
    Ok(PendingRewrite {
        reader,
        old_header,
        encoded,
        frames_read,
        frames_written: tag.len(),
        padding_dropped,
    })
}

impl<R: Read> PendingRewrite<R> {
    /// The new tag region that `write_to` will emit.
    pub fn encoded_tag(&self) -> &[u8] {
        &self.encoded
    }

    /// Write the new tag, then stream the untouched payload behind it.
    pub fn write_to<W: Write + ?Sized>(mut self, writer: &mut W) -> Result<RewriteReport, TagError> {
        writer.write_all(&self.encoded)?;
        let payload_bytes = copy_payload(&mut self.reader, writer)?;
        writer.flush()?;

        let report = RewriteReport {
            old_region_len: self.old_header.region_len() as u64,
            new_region_len: self.encoded.len() as u64,
            frames_read: self.frames_read,
            frames_written: self.frames_written,
            padding_dropped: self.padding_dropped as u64,
            payload_bytes,
        };
        debug!(?report, "rewrote tag");
        Ok(report)
    }
}

/// One-shot rewrite from `reader` to `writer`.
pub fn rewrite<R, W, F>(
    reader: R,
    writer: &mut W,
    policy: FlagPolicy,
    mutate: F,
) -> Result<RewriteReport, TagError>
where
    R: Read,
    W: Write + ?Sized,
    F: FnOnce(&mut Tag) -> Result<(), TagError>,
{
    prepare_rewrite(reader, policy, mutate)?.write_to(writer)
}
