use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::framing::{Frame, FrameId};

/// In-memory tag: frame id to text value.
///
/// Keys are unique and the last insert wins. Iteration (and therefore
/// serialization) follows the byte order of the ids, so the same tag always
/// encodes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    frames: BTreeMap<FrameId, String>,
}

impl Tag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &FrameId) -> Option<&str> {
        self.frames.get(id).map(String::as_str)
    }

    /// Insert or replace a value. Returns the previous value, if any.
    pub fn insert(&mut self, id: FrameId, value: impl Into<String>) -> Option<String> {
        self.frames.insert(id, value.into())
    }

    pub fn remove(&mut self, id: &FrameId) -> Option<String> {
        self.frames.remove(id)
    }

    pub fn contains(&self, id: &FrameId) -> bool {
        self.frames.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FrameId, &str)> + '_ {
        self.frames.iter().map(|(id, v)| (id, v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<FrameId, String> {
        self.frames
    }
}

impl From<BTreeMap<FrameId, String>> for Tag {
    fn from(frames: BTreeMap<FrameId, String>) -> Self {
        Self { frames }
    }
}

impl Extend<Frame> for Tag {
    fn extend<I: IntoIterator<Item = Frame>>(&mut self, iter: I) {
        for frame in iter {
            self.frames.insert(frame.id, frame.value);
        }
    }
}

impl FromIterator<Frame> for Tag {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        let mut tag = Tag::new();
        tag.extend(iter);
        tag
    }
}

impl IntoIterator for Tag {
    type Item = (FrameId, String);
    type IntoIter = btree_map::IntoIter<FrameId, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}
