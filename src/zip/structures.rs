//! Fixed-layout ZIP records.
//!
//! Each record decodes itself from a buffer and an offset through
//! [`cursor`](super::cursor). Signatures are checked by the caller, which
//! knows what error a mismatch means at that point of the walk.

use crate::error::OutOfBounds;

use super::cursor::{read_u16, read_u32, slice};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }
}

/// General purpose flag bit 3: sizes and CRC live in a trailing data
/// descriptor and are zero in the local header.
pub const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;

/// End of Central Directory (EOCD) - 22 bytes plus trailing comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: u32 = 0x0605_4b50;
    pub const SIZE: usize = 22;

    pub fn parse(buf: &[u8], offset: usize) -> Result<Self, OutOfBounds> {
        // Force the whole record into range before picking fields out of it.
        slice(buf, offset, Self::SIZE)?;
        Ok(Self {
            total_entries: read_u16(buf, offset + 10)?,
            cd_size: read_u32(buf, offset + 12)?,
            cd_offset: read_u32(buf, offset + 16)?,
            comment_len: read_u16(buf, offset + 20)?,
        })
    }

    /// Whether a record at `offset` accounts for every trailing byte of a
    /// buffer of `buf_len` bytes.
    pub fn spans_to_end(&self, offset: usize, buf_len: usize) -> bool {
        offset + Self::SIZE + self.comment_len as usize == buf_len
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus name, extra, comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryEntry<'a> {
    /// Offset of this header within the archive
    pub offset: usize,
    pub flags: u16,
    pub compression_method: CompressionMethod,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name: &'a [u8],
    pub extra_len: u16,
    pub comment_len: u16,
    pub lfh_offset: u32,
}

impl<'a> CentralDirectoryEntry<'a> {
    pub const SIGNATURE: u32 = 0x0201_4b50;
    pub const SIZE: usize = 46;

    pub fn parse(buf: &'a [u8], offset: usize) -> Result<Self, OutOfBounds> {
        slice(buf, offset, Self::SIZE)?;
        let name_len = read_u16(buf, offset + 28)?;
        Ok(Self {
            offset,
            flags: read_u16(buf, offset + 8)?,
            compression_method: CompressionMethod::from_u16(read_u16(buf, offset + 10)?),
            crc32: read_u32(buf, offset + 16)?,
            compressed_size: read_u32(buf, offset + 20)?,
            uncompressed_size: read_u32(buf, offset + 24)?,
            file_name: slice(buf, offset + Self::SIZE, name_len as usize)?,
            extra_len: read_u16(buf, offset + 30)?,
            comment_len: read_u16(buf, offset + 32)?,
            lfh_offset: read_u32(buf, offset + 42)?,
        })
    }

    /// Bytes this record occupies, i.e. the distance to the next one.
    pub fn record_len(&self) -> usize {
        Self::SIZE + self.file_name.len() + self.extra_len as usize + self.comment_len as usize
    }

    /// File name for display; non-UTF-8 bytes are replaced.
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(self.file_name).into_owned()
    }
}

/// Local File Header (LFH) - 30 bytes plus name and extra field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub offset: usize,
    pub flags: u16,
    pub compression_method: CompressionMethod,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_len: u16,
    pub extra_len: u16,
}

impl LocalFileHeader {
    pub const SIGNATURE: u32 = 0x0403_4b50;
    pub const SIZE: usize = 30;

    pub fn parse(buf: &[u8], offset: usize) -> Result<Self, OutOfBounds> {
        slice(buf, offset, Self::SIZE)?;
        Ok(Self {
            offset,
            flags: read_u16(buf, offset + 6)?,
            compression_method: CompressionMethod::from_u16(read_u16(buf, offset + 8)?),
            compressed_size: read_u32(buf, offset + 18)?,
            uncompressed_size: read_u32(buf, offset + 22)?,
            file_name_len: read_u16(buf, offset + 26)?,
            extra_len: read_u16(buf, offset + 28)?,
        })
    }

    /// Where the entry's payload begins.
    pub fn data_offset(&self) -> usize {
        self.offset + Self::SIZE + self.file_name_len as usize + self.extra_len as usize
    }

    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }
}
