//! Pulling one font's tables out of a collection.
//!
//! The extracted font keeps its directory exactly as stored (same tag
//! order, same checksums and search fields); only the table offsets change,
//! because the bodies are repacked back to back right after the directory.
use crate::error::{Error, Result};
use otspec::{Deserialize, Deserializer, ReaderContext, Tag};
use std::convert::TryFrom;

/// Fixed part of the sfnt header: version, numTables and the three search fields.
pub const SFNT_HEADER_LEN: usize = 12;
/// Size of one table record in the directory.
pub const TABLE_RECORD_LEN: usize = 16;

const RECORD_OFFSET_FIELD: usize = 8;

/// Round up to the next multiple of four, the sfnt table alignment.
pub fn ceil4(n: u32) -> u64 {
    (u64::from(n) + 3) & !3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    /// Absolute offset of the table body in the file this record came from.
    pub offset: u32,
    pub length: u32,
}

impl Deserialize for TableRecord {
    fn from_bytes(c: &mut ReaderContext) -> otspec::Result<Self> {
        Ok(TableRecord {
            tag: c.de()?,
            checksum: c.de()?,
            offset: c.de()?,
            length: c.de()?,
        })
    }
}

/// The sfnt header and table directory of a single font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    pub sfnt_version: u32,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    pub records: Vec<TableRecord>,
}

impl Deserialize for OffsetTable {
    fn from_bytes(c: &mut ReaderContext) -> otspec::Result<Self> {
        let sfnt_version: u32 = c.de()?;
        let num_tables: u16 = c.de()?;
        Ok(OffsetTable {
            sfnt_version,
            search_range: c.de()?,
            entry_selector: c.de()?,
            range_shift: c.de()?,
            records: c.de_counted(num_tables.into())?,
        })
    }
}

impl OffsetTable {
    /// Read the directory of the font whose header starts at `header_offset`.
    pub fn read(buffer: &[u8], header_offset: u32) -> Result<Self> {
        let mut rc = ReaderContext::at(buffer, header_offset as usize);
        Ok(rc.de()?)
    }

    pub fn num_tables(&self) -> usize {
        self.records.len()
    }

    /// Bytes taken by the header plus directory.
    pub fn header_len(&self) -> usize {
        SFNT_HEADER_LEN + TABLE_RECORD_LEN * self.records.len()
    }

    /// Size of the standalone font: header plus every table padded to four bytes.
    pub fn packed_len(&self) -> u64 {
        self.header_len() as u64
            + self
                .records
                .iter()
                .map(|r| ceil4(r.length))
                .sum::<u64>()
    }
}

/// The size of the font [`extract`] would produce, without copying anything.
pub fn extracted_len(buffer: &[u8], header_offset: u32) -> Result<u64> {
    Ok(OffsetTable::read(buffer, header_offset)?.packed_len())
}

/// Copy the font whose sfnt header is at `header_offset` into a new,
/// self-contained buffer.
///
/// Table offsets in the returned directory are relative to the start of
/// the returned buffer. Padding between tables is zero-filled. The source
/// buffer is only read; any field or table body lying outside it is an
/// [`Error::InvalidFormat`].
pub fn extract(buffer: &[u8], header_offset: u32) -> Result<Vec<u8>> {
    let directory = OffsetTable::read(buffer, header_offset)?;
    repack(buffer, header_offset, &directory)
}

/// [`extract`] for a directory the caller has already read from `header_offset`.
pub fn repack(buffer: &[u8], header_offset: u32, directory: &OffsetTable) -> Result<Vec<u8>> {
    let header_len = directory.header_len();

    // Check every body before sizing the output, so a lying directory is
    // reported as a format error rather than a huge allocation.
    for record in &directory.records {
        otspec::read_bytes(buffer, record.offset as usize, record.length as usize)?;
    }
    let total = directory.packed_len();
    let total = usize::try_from(total).map_err(|_| otspec::Error::OffsetOverflow(usize::MAX))?;

    let mut output: Vec<u8> = Vec::new();
    output.try_reserve_exact(total).map_err(Error::from)?;
    output.extend_from_slice(otspec::read_bytes(
        buffer,
        header_offset as usize,
        header_len,
    )?);
    output.resize(total, 0);

    let mut current_offset = header_len;
    for (j, record) in directory.records.iter().enumerate() {
        let new_offset =
            u32::try_from(current_offset).map_err(|_| otspec::Error::OffsetOverflow(current_offset))?;
        log::debug!(
            "\t{} {} bytes: {} -> {}",
            record.tag,
            record.length,
            record.offset,
            new_offset
        );
        otspec::write_u32(
            &mut output,
            SFNT_HEADER_LEN + TABLE_RECORD_LEN * j + RECORD_OFFSET_FIELD,
            new_offset,
        )?;
        let length = record.length as usize;
        let body = otspec::read_bytes(buffer, record.offset as usize, length)?;
        otspec::write_bytes(&mut output, current_offset, length)?.copy_from_slice(body);
        current_offset += ceil4(record.length) as usize;
    }
    Ok(output)
}
