use std::fmt;
use std::io;

use thiserror::Error;

use crate::{framing::FrameError, headers::HeaderError, synchsafe::SynchsafeError};

/// Optional ID3v2 features this codec refuses to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedFeature {
    Unsynchronisation,
    ExtendedHeader,
    Experimental,
    Footer,
    FrameFlags,
    Encoding,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnsupportedFeature::Unsynchronisation => "unsynchronisation",
            UnsupportedFeature::ExtendedHeader => "extended header",
            UnsupportedFeature::Experimental => "experimental indicator",
            UnsupportedFeature::Footer => "footer",
            UnsupportedFeature::FrameFlags => "frame flags",
            UnsupportedFeature::Encoding => "encoding",
        };
        f.write_str(s)
    }
}

/// Coarse classification of every failure the crate can report.
///
/// Callers branch on this (the CLI maps it to exit codes) instead of
/// matching the nested per-layer enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong magic, wrong fixed-size length, truncated data, bad UTF-8.
    Format,
    /// Major version other than 4.
    UnsupportedVersion,
    /// A header flag, frame flag or text encoding this codec does not handle.
    UnsupportedFeature(UnsupportedFeature),
    /// Integer too large for a synchsafe field.
    Range,
    /// Malformed caller input: bad frame id, empty argument, aliasing paths.
    Validation,
    /// Friendly name missing from the name table.
    UnknownFrameName,
    /// Underlying I/O failure.
    Io,
}

/// Unified error covering I/O, header, frame, size and caller validation.
/// - `From<T>` impls enable `?` across all layers.
/// - Messages are stable and contextual for logs and CLI output.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("size error: {0}")]
    Synchsafe(#[from] SynchsafeError),

    #[error("unsupported frame name {0:?}")]
    UnknownFrameName(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl TagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A file that ends inside its declared tag region is malformed, not unreadable.
            TagError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => ErrorKind::Format,
            TagError::Io(_) => ErrorKind::Io,
            TagError::Header(e) => e.kind(),
            TagError::Frame(e) => e.kind(),
            TagError::Synchsafe(e) => e.kind(),
            TagError::UnknownFrameName(_) => ErrorKind::UnknownFrameName,
            TagError::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl SynchsafeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynchsafeError::InvalidLength { .. } => ErrorKind::Format,
            SynchsafeError::OutOfRange { .. } => ErrorKind::Range,
        }
    }
}

impl HeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeaderError::BufferTooShort { .. } | HeaderError::InvalidMagic { .. } => ErrorKind::Format,
            HeaderError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            HeaderError::UnsupportedFeature(feature) => ErrorKind::UnsupportedFeature(*feature),
            HeaderError::Size(e) => e.kind(),
        }
    }
}

impl FrameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::Truncated { .. }
            | FrameError::NonAsciiId { .. }
            | FrameError::MissingEncoding { .. }
            | FrameError::InvalidText { .. } => ErrorKind::Format,
            FrameError::InvalidId { .. } => ErrorKind::Validation,
            FrameError::UnsupportedFlags { .. } => {
                ErrorKind::UnsupportedFeature(UnsupportedFeature::FrameFlags)
            }
            FrameError::UnsupportedEncoding { .. } => {
                ErrorKind::UnsupportedFeature(UnsupportedFeature::Encoding)
            }
            FrameError::Size(e) => e.kind(),
        }
    }
}
