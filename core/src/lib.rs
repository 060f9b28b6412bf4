//! id3-core
//!
//! Pure Rust ID3v2.4 text-tag codec.
//! No CLI, no argument parsing, no logging subscriber.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Codec layers, leaves first
pub mod synchsafe;
pub mod framing;
pub mod headers;
pub mod tag;

// Boundary
pub mod names;
pub mod io;
pub mod telemetry;
pub mod manager;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::CodecConfig;
    pub use crate::framing::{FlagPolicy, Frame, FrameId};
    pub use crate::headers::TagHeader;
    pub use crate::manager::TagManager;
    pub use crate::names::{frame_id_for, friendly_name_for};
    pub use crate::synchsafe::SynchsafeInteger;
    pub use crate::tag::{decode_tag_body, encode_tag, frames, read_tag, Tag};
    pub use crate::telemetry::RewriteReport;
    pub use crate::types::{ErrorKind, TagError, UnsupportedFeature};
}
