//! Bounds-checked little-endian reads over an in-memory archive.
//!
//! Every multi-byte field the parser touches goes through here, so a
//! truncated or hostile buffer turns into an [`OutOfBounds`] error instead
//! of a panic.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::OutOfBounds;

/// Borrow `width` bytes starting at `offset`.
pub fn slice(buf: &[u8], offset: usize, width: usize) -> Result<&[u8], OutOfBounds> {
    offset
        .checked_add(width)
        .and_then(|end| buf.get(offset..end))
        .ok_or(OutOfBounds {
            offset,
            width,
            len: buf.len(),
        })
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16, OutOfBounds> {
    slice(buf, offset, 2).map(LittleEndian::read_u16)
}

/// Read a little-endian `u32` at `offset`.
pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32, OutOfBounds> {
    slice(buf, offset, 4).map(LittleEndian::read_u32)
}
