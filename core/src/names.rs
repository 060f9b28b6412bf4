//! names.rs
//! Friendly name to frame id table.
//!
//! Plain immutable data. Lookups are case-sensitive.

use crate::framing::FrameId;
use crate::types::TagError;

/// Every friendly name the tool understands, with its frame id.
pub const FRAME_NAMES: &[(&str, FrameId)] = &[
    ("title", FrameId::from_static(*b"TIT2")),
    ("album", FrameId::from_static(*b"TALB")),
    ("track", FrameId::from_static(*b"TRCK")),
    ("performer", FrameId::from_static(*b"TPE1")),
    ("soft-settings", FrameId::from_static(*b"TSSE")),
];

/// Map a friendly name to its frame id.
pub fn frame_id_for(name: &str) -> Result<FrameId, TagError> {
    FRAME_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| TagError::UnknownFrameName(name.to_owned()))
}

/// Reverse lookup, for listings.
pub fn friendly_name_for(id: &FrameId) -> Option<&'static str> {
    FRAME_NAMES
        .iter()
        .find(|(_, known)| known == id)
        .map(|(name, _)| *name)
}

pub fn known_names() -> impl Iterator<Item = &'static str> {
    FRAME_NAMES.iter().map(|(name, _)| *name)
}
