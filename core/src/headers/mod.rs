//! headers/mod.rs
//! The fixed 10-byte ID3v2.4 tag header.
//!
//! Notes:
//! - Fixed-size header enables reading the whole tag region with exactly two reads.
//! - Only major version 4 is accepted; the minor version is carried but ignored.
//! - Any of the four defined flag bits is rejected: this codec never
//!   unsynchronises, never reads extended headers and never writes footers.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
