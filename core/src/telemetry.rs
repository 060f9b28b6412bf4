//! telemetry.rs
//! Plain-data report of what a tag rewrite touched.
//!
//! Summary: collected while a rewrite runs and returned to the caller once
//! the output is flushed. Serializable so front-ends can print it as JSON.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Header + declared body of the source tag.
    pub old_region_len: u64,
    /// Header + body of the tag that replaced it.
    pub new_region_len: u64,
    /// Frames decoded from the source, duplicates included.
    pub frames_read: usize,
    /// Frames in the new tag.
    pub frames_written: usize,
    /// Padding bytes in the source body that were not carried over.
    pub padding_dropped: u64,
    /// Audio bytes copied verbatim after the tag.
    pub payload_bytes: u64,
}

impl RewriteReport {
    /// Total bytes written to the destination.
    pub fn output_len(&self) -> u64 {
        self.new_region_len + self.payload_bytes
    }

    /// Growth (positive) or shrinkage (negative) of the tag region.
    pub fn region_delta(&self) -> i64 {
        self.new_region_len as i64 - self.old_region_len as i64
    }
}
