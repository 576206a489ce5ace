//! The TrueType Collection header.
//!
//! A collection starts with the `ttcf` tag, a version, the number of fonts
//! and then one 32-bit offset per font. Each offset is absolute within the
//! file and points at that font's own sfnt header; fonts in a collection
//! may share table data, which is why every table offset inside them is
//! also absolute.
use crate::error::{Error, Result};
use otspec::{Deserialize, Deserializer, ReaderContext, Tag};
use std::convert::TryFrom;

pub const TTC_TAG: Tag = Tag::new(b"ttcf");

/// Byte offset of the `numFonts` field.
const NUM_FONTS_OFFSET: usize = 8;
/// Byte offset of the first entry of the offset array.
const OFFSET_TABLE_OFFSET: usize = 12;

/// True if the buffer carries the `ttcf` signature.
///
/// A false result just means the file is an ordinary single font, or not a
/// font at all; it is up to the caller to decide whether that is an error.
pub fn is_ttc(buffer: &[u8]) -> bool {
    otspec::read_bytes(buffer, 0, 4).map_or(false, |b| b == TTC_TAG.as_bytes())
}

/// The number of fonts in the collection. Check [`is_ttc`] first.
pub fn font_count(buffer: &[u8]) -> Result<u32> {
    Ok(otspec::read_u32(buffer, NUM_FONTS_OFFSET)?)
}

/// The absolute offset of font `index`'s sfnt header.
pub fn font_header_offset(buffer: &[u8], index: u32) -> Result<u32> {
    let count = font_count(buffer)?;
    if index >= count {
        return Err(Error::BadFontIndex {
            index: index.into(),
            count: Some(count),
        });
    }
    let slot = usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_mul(4))
        .ok_or(otspec::Error::OffsetOverflow(index as usize))?;
    let pos = otspec::offset_add(OFFSET_TABLE_OFFSET, slot, buffer.len())?;
    Ok(otspec::read_u32(buffer, pos)?)
}

/// Digital signature location carried by version 2 headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsigRecord {
    /// `DSIG` when a signature is present, zero otherwise.
    pub tag: u32,
    pub length: u32,
    pub offset: u32,
}

impl DsigRecord {
    pub fn is_present(&self) -> bool {
        self.tag != 0
    }
}

/// A fully parsed collection header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtcHeader {
    pub major_version: u16,
    pub minor_version: u16,
    pub offsets: Vec<u32>,
    pub dsig: Option<DsigRecord>,
}

impl TtcHeader {
    /// Parse the header at the start of `buffer`.
    pub fn read(buffer: &[u8]) -> Result<Self> {
        if !is_ttc(buffer) {
            return Err(Error::NotTtc);
        }
        let mut rc = ReaderContext::new(buffer);
        Ok(rc.de()?)
    }

    pub fn num_fonts(&self) -> usize {
        self.offsets.len()
    }
}

impl Deserialize for TtcHeader {
    fn from_bytes(c: &mut ReaderContext) -> otspec::Result<Self> {
        let tag: Tag = c.de()?;
        if tag != TTC_TAG {
            log::warn!("Collection header has tag {}, expected {}", tag, TTC_TAG);
        }
        let major_version: u16 = c.de()?;
        let minor_version: u16 = c.de()?;
        let num_fonts: u32 = c.de()?;
        let offsets: Vec<u32> = c.de_counted(num_fonts as usize)?;
        let dsig = if major_version >= 2 {
            Some(DsigRecord {
                tag: c.de()?,
                length: c.de()?,
                offset: c.de()?,
            })
        } else {
            None
        };
        Ok(TtcHeader {
            major_version,
            minor_version,
            offsets,
            dsig,
        })
    }
}
