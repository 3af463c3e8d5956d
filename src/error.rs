//! Error types for the extraction pipeline.

use thiserror::Error;

/// A failed read past the end of the archive buffer.
///
/// Produced by the byte cursor; each parsing stage maps it onto the
/// [`ExtractionError`] kind that describes what was being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("read of {width} bytes at offset {offset} exceeds buffer of {len} bytes")]
pub struct OutOfBounds {
    pub offset: usize,
    pub width: usize,
    pub len: usize,
}

/// Everything that can go wrong while pulling an entry out of an archive
/// and turning it into a bitmap.
///
/// All variants are terminal for the call that produced them.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("archive too small: {len} bytes, need at least 22")]
    ArchiveTooSmall { len: usize },

    #[error("no end of central directory record found")]
    EndOfCentralDirectoryNotFound,

    #[error("corrupted central directory at offset {offset}")]
    CorruptedCentralDirectory { offset: usize },

    #[error("none of the candidate entries exist in the archive")]
    EntryNotFound,

    #[error("corrupted local file header at offset {offset}")]
    CorruptedLocalHeader { offset: usize },

    #[error("unsupported compression method: {0}")]
    UnsupportedCompressionMethod(u16),

    #[error("entry declares {declared} bytes uncompressed, limit is {limit}")]
    EntryTooLarge { declared: u64, limit: u64 },

    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("invalid image data: {0}")]
    InvalidImageData(String),

    #[error("scaling to {width}x{height} failed")]
    ScalingFailed { width: u32, height: u32 },
}

impl ExtractionError {
    /// True when the archive was readable but simply has no matching entry.
    ///
    /// Callers usually show a fallback icon in this case instead of
    /// reporting a failure.
    pub fn is_missing_entry(&self) -> bool {
        matches!(self, ExtractionError::EntryNotFound)
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
