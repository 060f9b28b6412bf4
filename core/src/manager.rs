//! manager.rs
//! File-level orchestration: named get/set over the tag codec.
//!
//! Every call is self-contained: the file is opened, used and closed within
//! the call, on success and on failure alike.

use std::path::Path;

use tracing::{debug, info};

use crate::config::CodecConfig;
use crate::framing::FrameId;
use crate::headers::TagHeader;
use crate::io::{open_input, open_output, prepare_rewrite, InputSource, OutputSink};
use crate::names::frame_id_for;
use crate::tag::{read_tag_from_path, Tag};
use crate::telemetry::RewriteReport;
use crate::types::TagError;

#[derive(Debug, Clone, Default)]
pub struct TagManager {
    config: CodecConfig,
}

impl TagManager {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Header and frames of the tag at the start of `path`.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<(TagHeader, Tag), TagError> {
        let path = path.as_ref();
        require_path("input path", path)?;
        read_tag_from_path(path, self.config.flag_policy)
    }

    /// All frames of the tag at the start of `path`.
    pub fn get_frames(&self, path: impl AsRef<Path>) -> Result<Tag, TagError> {
        self.read(path).map(|(_, tag)| tag)
    }

    /// Value of the frame behind `name`, or `None` if the tag lacks it.
    ///
    /// Fails with `UnknownFrameName` before touching the file if `name` is
    /// not in the name table.
    pub fn get_frame_value(
        &self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<Option<String>, TagError> {
        require_non_empty("frame name", name)?;
        let id = frame_id_for(name)?;
        let mut tag = self.get_frames(path)?;
        Ok(tag.remove(&id))
    }

    /// Copy `path` to `output` with the frame behind `name` set to `value`.
    ///
    /// The source tag region (10 + declared body size) is replaced by the
    /// re-encoded tag; every byte after it is copied unchanged.
    pub fn set_frame_value(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        value: &str,
        output: impl AsRef<Path>,
    ) -> Result<RewriteReport, TagError> {
        require_non_empty("frame name", name)?;
        let id = frame_id_for(name)?;
        self.set_frame_value_by_id(path, id, value, output)
    }

    /// Raw-id form of [`TagManager::set_frame_value`].
    pub fn set_frame_value_by_id(
        &self,
        path: impl AsRef<Path>,
        id: FrameId,
        value: &str,
        output: impl AsRef<Path>,
    ) -> Result<RewriteReport, TagError> {
        let value = value.to_owned();
        self.rewrite_file(path.as_ref(), output.as_ref(), move |tag| {
            tag.insert(id, value);
            Ok(())
        })
    }

    /// Copy `path` to `output` without the frame behind `name`.
    ///
    /// Removing a frame the tag does not have is not an error; the file is
    /// still rewritten (and its padding dropped).
    pub fn remove_frame(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        output: impl AsRef<Path>,
    ) -> Result<RewriteReport, TagError> {
        require_non_empty("frame name", name)?;
        let id = frame_id_for(name)?;
        self.rewrite_file(path.as_ref(), output.as_ref(), move |tag| {
            if tag.remove(&id).is_none() {
                debug!(%id, "frame not present, nothing to remove");
            }
            Ok(())
        })
    }

    fn rewrite_file<F>(&self, src: &Path, dst: &Path, mutate: F) -> Result<RewriteReport, TagError>
    where
        F: FnOnce(&mut Tag) -> Result<(), TagError>,
    {
        require_path("input path", src)?;
        require_path("output path", dst)?;
        ensure_distinct(src, dst)?;

        let reader = open_input(InputSource::File(src.to_path_buf()))?;
        let pending = prepare_rewrite(reader, self.config.flag_policy, mutate)?;

        // Only create the destination once the source tag has been decoded.
        let mut writer = open_output(OutputSink::File(dst.to_path_buf()))?;
        let report = pending.write_to(&mut writer)?;

        info!(
            src = %src.display(),
            dst = %dst.display(),
            tag_bytes = report.new_region_len,
            payload_bytes = report.payload_bytes,
            "tag rewritten"
        );
        Ok(report)
    }
}

fn require_non_empty(what: &str, s: &str) -> Result<(), TagError> {
    if s.is_empty() {
        return Err(TagError::Validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

fn require_path(what: &str, p: &Path) -> Result<(), TagError> {
    if p.as_os_str().is_empty() {
        return Err(TagError::Validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Writing over the source would truncate it before its payload is copied.
fn ensure_distinct(src: &Path, dst: &Path) -> Result<(), TagError> {
    let same = src == dst
        || matches!(
            (src.canonicalize(), dst.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(TagError::Validation(format!(
            "output path {} is the source file; write to a different path",
            dst.display()
        )));
    }
    Ok(())
}
