//! Bounds-checked access to big-endian OpenType data.
//!
//! Every multi-byte field in a font file is stored big-endian, and every
//! offset we follow comes out of the file itself. Nothing in this crate
//! indexes a buffer without checking the range first; a read past the end
//! comes back as [`Error::OutOfBounds`] rather than a panic.
use std::convert::TryInto;
use std::mem;

mod tag;

pub use crate::tag::Tag;

/// Errors raised while reading or writing font data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("read of {size} bytes at offset {offset} overruns buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("offset {0} does not fit in 32 bits")]
    OffsetOverflow(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Interpret two bytes as a big-endian `u16`.
pub const fn be_u16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Interpret four bytes as a big-endian `u32`.
pub const fn be_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

fn range(len: usize, offset: usize, size: usize) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(size) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(Error::OutOfBounds { offset, size, len }),
    }
}

/// Borrow `size` bytes starting at `offset`.
pub fn read_bytes(buffer: &[u8], offset: usize, size: usize) -> Result<&[u8]> {
    Ok(&buffer[range(buffer.len(), offset, size)?])
}

/// Mutably borrow `size` bytes starting at `offset`.
pub fn write_bytes(buffer: &mut [u8], offset: usize, size: usize) -> Result<&mut [u8]> {
    let r = range(buffer.len(), offset, size)?;
    Ok(&mut buffer[r])
}

pub fn read_u16(buffer: &[u8], offset: usize) -> Result<u16> {
    let bytes = read_bytes(buffer, offset, mem::size_of::<u16>())?;
    // length was checked above
    Ok(be_u16([bytes[0], bytes[1]]))
}

pub fn read_u32(buffer: &[u8], offset: usize) -> Result<u32> {
    let bytes = read_bytes(buffer, offset, mem::size_of::<u32>())?;
    Ok(be_u32([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Store `value` big-endian at `offset`.
pub fn write_u32(buffer: &mut [u8], offset: usize, value: u32) -> Result<()> {
    write_bytes(buffer, offset, mem::size_of::<u32>())?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// `base + delta`, treating overflow of file-supplied offsets as an overrun.
pub fn offset_add(base: usize, delta: usize, len: usize) -> Result<usize> {
    base.checked_add(delta).ok_or(Error::OutOfBounds {
        offset: base,
        size: delta,
        len,
    })
}

/// A cursor over a borrowed font buffer.
///
/// Records are pulled off the front with [`Deserializer::de`]; the cursor
/// only advances when a read succeeds.
pub struct ReaderContext<'a> {
    pub input: &'a [u8],
    pub ptr: usize,
}

impl<'a> ReaderContext<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        ReaderContext { input, ptr: 0 }
    }

    /// A context positioned at `offset`. Nothing is checked until the first read.
    pub fn at(input: &'a [u8], offset: usize) -> Self {
        ReaderContext { input, ptr: offset }
    }

    pub fn consume(&mut self, bytes: usize) -> Result<&'a [u8]> {
        let subslice = read_bytes(self.input, self.ptr, bytes)?;
        self.ptr += bytes;
        Ok(subslice)
    }

    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.ptr)
    }
}

/// Something with a fixed on-disk layout that can be read off a [`ReaderContext`].
pub trait Deserialize {
    fn from_bytes(c: &mut ReaderContext) -> Result<Self>
    where
        Self: std::marker::Sized;
}

pub trait Deserializer<T>
where
    T: Deserialize,
{
    fn de(&mut self) -> Result<T>;
    fn de_counted(&mut self, s: usize) -> Result<Vec<T>>;
}

impl<'a, T> Deserializer<T> for ReaderContext<'a>
where
    T: Deserialize,
{
    fn de(&mut self) -> Result<T> {
        let start = self.ptr;
        T::from_bytes(self).map_err(|e| {
            self.ptr = start;
            e
        })
    }

    fn de_counted(&mut self, s: usize) -> Result<Vec<T>> {
        (0..s).map(|_| self.de()).collect()
    }
}

macro_rules! de_primitive {
    ($t: ty) => {
        impl Deserialize for $t {
            fn from_bytes(c: &mut ReaderContext) -> Result<Self> {
                let bytes: &[u8] = c.consume(mem::size_of::<$t>())?;
                let bytes_array: [u8; mem::size_of::<$t>()] = bytes.try_into().map_err(|_| {
                    Error::OutOfBounds {
                        offset: c.ptr,
                        size: mem::size_of::<$t>(),
                        len: c.input.len(),
                    }
                })?;
                Ok(<$t>::from_be_bytes(bytes_array))
            }
        }
    };
}

de_primitive!(u8);
de_primitive!(u16);
de_primitive!(u32);
de_primitive!(i16);
de_primitive!(i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_primitive() {
        let data = [0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x04];
        assert_eq!(read_u16(&data, 0).unwrap(), 1);
        assert_eq!(read_u16(&data, 2).unwrap(), 2);
        assert_eq!(read_u32(&data, 4).unwrap(), 4);
        assert_eq!(read_u32(&data, 1).unwrap(), 0x0100_0200);
    }

    #[test]
    fn read_past_end() {
        let data = [0x74, 0x74, 0x63, 0x66, 0x00];
        assert_eq!(
            read_u32(&data, 2),
            Err(Error::OutOfBounds {
                offset: 2,
                size: 4,
                len: 5
            })
        );
        assert!(read_u16(&data, 4).is_err());
        assert!(read_u16(&data, 3).is_ok());
        assert!(read_u32(&data, usize::MAX).is_err());
        assert!(read_bytes(&data, 1, usize::MAX).is_err());
    }

    #[test]
    fn write_be() {
        let mut data = vec![0; 6];
        write_u32(&mut data, 1, 0x0102_0304).unwrap();
        assert_eq!(data, [0x00, 0x01, 0x02, 0x03, 0x04, 0x00]);
        assert!(write_u32(&mut data, 3, 0).is_err());
        // a failed write leaves the buffer alone
        assert_eq!(data, [0x00, 0x01, 0x02, 0x03, 0x04, 0x00]);
    }

    #[test]
    fn de_primitive() {
        let data = [0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x04];
        let mut rc = ReaderContext::new(&data);
        let first: u16 = rc.de().unwrap();
        let second: u16 = rc.de().unwrap();
        let third: u32 = rc.de().unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 4);
        assert_eq!(rc.remaining(), 0);
    }

    #[test]
    fn de_failure_keeps_position() {
        let data = [0x00, 0x01, 0x00];
        let mut rc = ReaderContext::new(&data);
        let _: u16 = rc.de().unwrap();
        let r: Result<u32> = rc.de();
        assert!(r.is_err());
        assert_eq!(rc.ptr, 2);
    }

    #[test]
    fn de_counted() {
        let data = [0x00, 0x0a, 0x00, 0x0b, 0x00, 0x0c];
        let mut rc = ReaderContext::at(&data, 2);
        let t: Vec<u16> = rc.de_counted(2).unwrap();
        assert_eq!(t, vec![11, 12]);
        let mut rc = ReaderContext::new(&data);
        let t: Result<Vec<u16>> = rc.de_counted(4);
        assert!(t.is_err());
    }
}
