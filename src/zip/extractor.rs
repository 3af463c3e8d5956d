use log::debug;

use crate::config::Limits;
use crate::error::{ExtractionError, Result};

use super::inflate::decompress;
use super::parser::ZipParser;

/// Pulls a single named entry out of an in-memory ZIP archive.
#[derive(Debug, Clone, Copy)]
pub struct ZipExtractor<'a> {
    parser: ZipParser<'a>,
    limits: Limits,
}

impl<'a> ZipExtractor<'a> {
    pub fn new(archive: &'a [u8]) -> Self {
        Self::with_limits(archive, Limits::default())
    }

    pub fn with_limits(archive: &'a [u8], limits: Limits) -> Self {
        Self {
            parser: ZipParser::new(archive),
            limits,
        }
    }

    /// Extract the first candidate present in the archive, decompressed.
    pub fn extract<S: AsRef<str>>(&self, candidates: &[S]) -> Result<Vec<u8>> {
        let (eocd, _) = self.parser.find_eocd()?;
        let entry = self.parser.find_entry(&eocd, candidates)?;
        let local = self.parser.read_local_entry(&entry)?;

        let declared = local.uncompressed_size as u64;
        if declared > self.limits.max_entry_size {
            return Err(ExtractionError::EntryTooLarge {
                declared,
                limit: self.limits.max_entry_size,
            });
        }

        let data = decompress(local.data, local.uncompressed_size, entry.compression_method)?;
        debug!("extracted {} ({} bytes)", entry.display_name(), data.len());
        Ok(data.into_owned())
    }
}

/// Extract the first of `candidates` found in `archive`, using default
/// [`Limits`].
pub fn extract_named_entry<S: AsRef<str>>(archive: &[u8], candidates: &[S]) -> Result<Vec<u8>> {
    ZipExtractor::new(archive).extract(candidates)
}

/// [`extract_named_entry`] with explicit limits.
pub fn extract_named_entry_with_limits<S: AsRef<str>>(
    archive: &[u8],
    candidates: &[S],
    limits: &Limits,
) -> Result<Vec<u8>> {
    ZipExtractor::with_limits(archive, *limits).extract(candidates)
}
