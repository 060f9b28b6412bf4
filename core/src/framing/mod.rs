//! Wire framing for ID3v2.4 text frames.
//!
//! Responsibilities:
//! - Define frame identifiers, headers and records
//! - Encode frames into the canonical byte layout
//! - Decode frames, screening flag bytes per `FlagPolicy`
//!
//! Non-responsibilities:
//! - Tag headers
//! - Padding bookkeeping (callers check `is_padding` first)
//! - IO

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    FlagPolicy,
    Frame,
    FrameError,
    FrameHeader,
    FrameId,
};
pub use encode::{encode_frame, encode_text_frame, write_text_frame};
pub use decode::{decode_frame, decode_frame_with, is_padding, parse_frame_header};
