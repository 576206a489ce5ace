//! OpenType tags.

use crate::{Deserialize, Error, ReaderContext};

/// An OpenType tag.
///
/// Table tags and the `ttcf` collection signature are both tags. Tags read
/// from a file are kept exactly as stored, even if a byte falls outside the
/// printable ascii range, so that a directory can be copied through intact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(raw: &[u8; 4]) -> Self {
        Tag(*raw)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Text form; bytes that are not valid utf-8 show as replacement characters.
    pub fn to_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl Deserialize for Tag {
    fn from_bytes(c: &mut ReaderContext) -> Result<Self, Error> {
        let bytes = c.consume(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(Tag(raw))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl std::fmt::Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}
