//! Splitting collection files into standalone fonts on disk.
//!
//! Input that does not start with `ttcf` is always rejected with
//! [`Error::NotTtc`], in both single-font and all-fonts mode; nothing is
//! copied through.
//!
//! Work stops at the first error. Fonts already written by an all-fonts
//! split are left where they are.
use crate::collection::{font_header_offset, is_ttc, TtcHeader};
use crate::error::{Error, Result};
use crate::sfnt::{repack, OffsetTable};
use std::fs;
use std::path::{Path, PathBuf};

/// One invocation of the splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Write every font in `input` to `font<N>.ttf` in the working directory.
    AllFonts { input: PathBuf },
    /// Write font `index` of `input` to `output`.
    SingleFont {
        input: PathBuf,
        index: u32,
        output: PathBuf,
    },
}

/// Read a whole file into memory.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Create (or truncate) `path` and write `data` to it.
pub fn write_all(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// The file name all-fonts mode uses for font `index`.
pub fn output_name(index: u32) -> String {
    format!("font{}.ttf", index)
}

/// Extract font `index` from an in-memory collection.
pub fn extract_font(data: &[u8], index: u32) -> Result<Vec<u8>> {
    if !is_ttc(data) {
        return Err(Error::NotTtc);
    }
    let header_offset = font_header_offset(data, index)?;
    extract_at(data, index, header_offset)
}

fn extract_at(data: &[u8], index: u32, header_offset: u32) -> Result<Vec<u8>> {
    let directory = OffsetTable::read(data, header_offset)?;
    log::info!(
        "Extract TTF #{}: header offset {}, header size {} bytes",
        index,
        header_offset,
        directory.header_len()
    );
    repack(data, header_offset, &directory)
}

/// Extract font `index` from the collection file at `path`.
pub fn extract_font_from_file(path: &Path, index: u32) -> Result<Vec<u8>> {
    let data = read_all(path)?;
    extract_font(&data, index).map_err(|e| e.in_file(path))
}

/// Write every font of the collection at `input` into `out_dir`, returning
/// the paths written in index order.
pub fn split_all_into(input: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let data = read_all(input)?;
    let header = TtcHeader::read(&data).map_err(|e| e.in_file(input))?;
    log::info!(
        "{} contains {} fonts (version {}.{})",
        input.display(),
        header.num_fonts(),
        header.major_version,
        header.minor_version
    );
    if let Some(dsig) = header.dsig.filter(|d| d.is_present()) {
        log::info!(
            "Collection signature: {} bytes at offset {}, not carried into the fonts",
            dsig.length,
            dsig.offset
        );
    }

    let mut written = vec![];
    for (index, &header_offset) in (0u32..).zip(header.offsets.iter()) {
        // each font's buffer is dropped before the next is built
        let font = extract_at(&data, index, header_offset).map_err(|e| e.in_file(input))?;
        let dest = out_dir.join(output_name(index));
        write_all(&dest, &font)?;
        log::info!("Wrote {} ({} bytes)", dest.display(), font.len());
        written.push(dest);
    }
    Ok(written)
}

/// Write font `index` of the collection at `input` to `output`.
pub fn split_one(input: &Path, index: u32, output: &Path) -> Result<PathBuf> {
    let font = extract_font_from_file(input, index)?;
    write_all(output, &font)?;
    log::info!("Wrote {} ({} bytes)", output.display(), font.len());
    Ok(output.to_path_buf())
}

/// Carry out a request, returning the files written.
pub fn run(request: &Request) -> Result<Vec<PathBuf>> {
    match request {
        Request::AllFonts { input } => split_all_into(input, Path::new(".")),
        Request::SingleFont {
            input,
            index,
            output,
        } => Ok(vec![split_one(input, *index, output)?]),
    }
}
