//! Split a TrueType Collection (`.ttc`) into standalone TrueType fonts.
//!
//! A collection is a `ttcf` header followed by any number of sfnt fonts,
//! whose table offsets are absolute within the collection and whose tables
//! may be shared between fonts. Splitting copies one font's directory and
//! table bodies into a fresh buffer, repacked and re-aligned so the result
//! stands on its own.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let font = ttc2ttf::extract_font_from_file(Path::new("fonts.ttc"), 0)?;
//! ttc2ttf::write_all(Path::new("first.ttf"), &font)?;
//! # Ok::<(), ttc2ttf::Error>(())
//! ```
pub mod collection;
mod error;
pub mod sfnt;
mod split;

#[cfg(test)]
mod testutil;

pub use crate::collection::{font_count, font_header_offset, is_ttc, TtcHeader};
pub use crate::error::{Error, Result};
pub use crate::sfnt::{ceil4, extract, extracted_len, repack, OffsetTable, TableRecord};
pub use crate::split::{
    extract_font, extract_font_from_file, output_name, read_all, run, split_all_into,
    split_one, write_all, Request,
};
