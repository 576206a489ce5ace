//! In-memory construction of collections for tests.
use std::num::Wrapping;

/// Filler written between table bodies in the source collection, so that
/// tests notice if it leaks into the padding of an extracted font.
pub(crate) const GARBAGE: u8 = 0xAA;

pub(crate) fn checksum(x: &[u8]) -> u32 {
    let mut sum = Wrapping(0u32);
    for slice in x.chunks(4) {
        let mut word = [0u8; 4];
        word[..slice.len()].copy_from_slice(slice);
        sum += Wrapping(u32::from_be_bytes(word));
    }
    sum.0
}

#[derive(Clone)]
pub(crate) struct FontBuilder {
    sfnt_version: u32,
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl FontBuilder {
    pub(crate) fn new() -> Self {
        FontBuilder {
            sfnt_version: 0x0001_0000,
            tables: vec![],
        }
    }

    pub(crate) fn table(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.tables.push((*tag, data.to_vec()));
        self
    }

    fn header_len(&self) -> usize {
        12 + 16 * self.tables.len()
    }
}

/// Lays out the `ttcf` header, an optional run of zero bytes, then every
/// font's directory, then the table bodies. Bodies are not padded and each
/// one is followed by a single [`GARBAGE`] byte. Identical tables are stored once and shared.
pub(crate) struct CollectionBuilder {
    fonts: Vec<FontBuilder>,
    gap: usize,
}

impl CollectionBuilder {
    pub(crate) fn new() -> Self {
        CollectionBuilder {
            fonts: vec![],
            gap: 0,
        }
    }

    pub(crate) fn font(mut self, font: FontBuilder) -> Self {
        self.fonts.push(font);
        self
    }

    /// Leave `gap` zero bytes between the offset array and the first directory.
    pub(crate) fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let header_len = 12 + 4 * self.fonts.len() + self.gap;
        let dirs_len: usize = self.fonts.iter().map(|f| f.header_len()).sum();

        let mut bodies: Vec<u8> = vec![];
        let mut placed: Vec<(&[u8; 4], &Vec<u8>, u32)> = vec![];
        let mut directories: Vec<u8> = vec![];
        for font in &self.fonts {
            let n = font.tables.len() as u16;
            let entry_selector = if n == 0 { 0 } else { 15 - n.leading_zeros() as u16 };
            let search_range: u16 = if n == 0 { 0 } else { 16 << entry_selector };
            directories.extend_from_slice(&font.sfnt_version.to_be_bytes());
            directories.extend_from_slice(&n.to_be_bytes());
            directories.extend_from_slice(&search_range.to_be_bytes());
            directories.extend_from_slice(&entry_selector.to_be_bytes());
            directories.extend_from_slice(&(n * 16 - search_range).to_be_bytes());
            for (tag, data) in &font.tables {
                let offset = match placed.iter().find(|(t, d, _)| *t == tag && *d == data) {
                    Some((_, _, offset)) => *offset,
                    None => {
                        let offset = (header_len + dirs_len + bodies.len()) as u32;
                        bodies.extend_from_slice(data);
                        bodies.push(GARBAGE);
                        placed.push((tag, data, offset));
                        offset
                    }
                };
                directories.extend_from_slice(tag);
                directories.extend_from_slice(&checksum(data).to_be_bytes());
                directories.extend_from_slice(&offset.to_be_bytes());
                directories.extend_from_slice(&(data.len() as u32).to_be_bytes());
            }
        }

        let mut out = b"ttcf".to_vec();
        out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        out.extend_from_slice(&(self.fonts.len() as u32).to_be_bytes());
        let mut font_offset = header_len;
        for font in &self.fonts {
            out.extend_from_slice(&(font_offset as u32).to_be_bytes());
            font_offset += font.header_len();
        }
        out.resize(out.len() + self.gap, 0);
        out.extend(directories);
        out.extend(bodies);
        out
    }
}
