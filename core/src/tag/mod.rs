//! tag/mod.rs
//! Whole-tag codec: the frame table behind a tag header.
//!
//! Public API:
//! - [`frames`] lazily walks a tag body until padding or its end.
//! - [`decode_tag_body`] / [`decode_tag`] fold frames into a [`Tag`].
//! - [`read_tag`] / [`read_tag_from_path`] pull the tag region off a reader or file.
//! - [`encode_tag_body`] / [`encode_tag`] serialize a [`Tag`] without padding.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::Tag;
pub use encode::{encode_tag, encode_tag_body};
pub use decode::{
    decode_tag, decode_tag_body, decode_tag_body_with, frames, frames_with, read_tag,
    read_tag_from_path, read_tag_with, FrameIter,
};
