//! Low-level ZIP archive parser.
//!
//! Walks the archive the way ZIP intends it to be read:
//! 1. Find the End of Central Directory (EOCD) at the buffer's end
//! 2. Scan the Central Directory for a wanted file name
//! 3. Follow the match to its Local File Header and slice out the payload
//!
//! Everything borrows from the caller's buffer; nothing is copied until
//! decompression.

use log::{debug, trace};

use crate::error::{ExtractionError, Result};

use super::cursor::{read_u32, slice};
use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: usize = u16::MAX as usize;

/// An entry's payload as stored in the archive, still compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEntry<'a> {
    pub header: LocalFileHeader,
    pub data: &'a [u8],
    pub uncompressed_size: u32,
}

/// Low-level ZIP parser over an in-memory archive.
///
/// Holds nothing but the borrowed buffer, so one parser per call is cheap
/// and independent calls never share state.
///
/// ```
/// use thumbzip::zip::ZipParser;
///
/// # fn run(bytes: &[u8]) -> thumbzip::Result<()> {
/// let parser = ZipParser::new(bytes);
/// let (eocd, _) = parser.find_eocd()?;
/// let entry = parser.find_entry(&eocd, &["Thumbnail.png"])?;
/// let local = parser.read_local_entry(&entry)?;
/// println!("{} compressed bytes", local.data.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ZipParser<'a> {
    buf: &'a [u8],
}

impl<'a> ZipParser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Searches backwards from the last position a 22-byte record could
    /// start, through the largest possible trailing comment. A signature
    /// whose comment length accounts for exactly the rest of the buffer is
    /// preferred, since comments may themselves contain the signature bytes.
    /// If none lines up, the first match from the end is used so archives
    /// with trailing junk still open.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in the buffer).
    pub fn find_eocd(&self) -> Result<(EndOfCentralDirectory, usize)> {
        let len = self.buf.len();
        if len < EndOfCentralDirectory::SIZE {
            return Err(ExtractionError::ArchiveTooSmall { len });
        }

        let last = len - EndOfCentralDirectory::SIZE;
        let first = last.saturating_sub(MAX_COMMENT_SIZE);
        let mut fallback = None;

        for offset in (first..=last).rev() {
            if read_u32(self.buf, offset) != Ok(EndOfCentralDirectory::SIGNATURE) {
                continue;
            }
            let eocd = EndOfCentralDirectory::parse(self.buf, offset)
                .map_err(|_| ExtractionError::EndOfCentralDirectoryNotFound)?;

            if eocd.spans_to_end(offset, len) {
                debug!(
                    "eocd at {offset}: {} entries, cd of {} bytes at {}",
                    eocd.total_entries, eocd.cd_size, eocd.cd_offset
                );
                return Ok((eocd, offset));
            }
            trace!("eocd signature at {offset} does not span to end of archive");
            if fallback.is_none() {
                fallback = Some((eocd, offset));
            }
        }

        match fallback {
            Some((eocd, offset)) => {
                debug!(
                    "using unaligned eocd at {offset}: {} entries, cd of {} bytes at {}",
                    eocd.total_entries, eocd.cd_size, eocd.cd_offset
                );
                Ok((eocd, offset))
            }
            None => Err(ExtractionError::EndOfCentralDirectoryNotFound),
        }
    }

    /// Scan the Central Directory for the first candidate name present.
    ///
    /// `candidates` is in priority order: an entry matching an earlier
    /// candidate wins over one matching a later candidate, regardless of
    /// where the two sit in the directory. Names are compared byte for byte.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::CorruptedCentralDirectory`] when a header is
    /// missing its signature or runs off the buffer; the walk cannot
    /// resynchronize after that. [`ExtractionError::EntryNotFound`] when
    /// the directory was read completely without a match.
    pub fn find_entry<S: AsRef<str>>(
        &self,
        eocd: &EndOfCentralDirectory,
        candidates: &[S],
    ) -> Result<CentralDirectoryEntry<'a>> {
        let mut offset = eocd.cd_offset as usize;
        let mut best: Option<(usize, CentralDirectoryEntry<'a>)> = None;

        for _ in 0..eocd.total_entries {
            let corrupted = ExtractionError::CorruptedCentralDirectory { offset };
            if read_u32(self.buf, offset) != Ok(CentralDirectoryEntry::SIGNATURE) {
                return Err(corrupted);
            }
            let entry = CentralDirectoryEntry::parse(self.buf, offset).map_err(|_| corrupted)?;
            let next = offset + entry.record_len();
            trace!("cd entry at {offset}: {}", entry.display_name());

            let rank = candidates
                .iter()
                .position(|name| name.as_ref().as_bytes() == entry.file_name);
            if let Some(rank) = rank {
                if best.as_ref().is_none_or(|(current, _)| rank < *current) {
                    best = Some((rank, entry));
                }
                if rank == 0 {
                    break;
                }
            }

            if next > self.buf.len() {
                return Err(ExtractionError::CorruptedCentralDirectory { offset: next });
            }
            offset = next;
        }

        match best {
            Some((_, entry)) => {
                debug!(
                    "matched {} ({:?}, {} -> {} bytes, crc {:08x})",
                    entry.display_name(),
                    entry.compression_method,
                    entry.compressed_size,
                    entry.uncompressed_size,
                    entry.crc32
                );
                Ok(entry)
            }
            None => Err(ExtractionError::EntryNotFound),
        }
    }

    /// Follow a Central Directory entry to its Local File Header and slice
    /// out the stored payload.
    ///
    /// Sizes come from the local header. When the local header defers them
    /// to a data descriptor, the Central Directory sizes are used instead.
    pub fn read_local_entry(&self, entry: &CentralDirectoryEntry<'_>) -> Result<LocalEntry<'a>> {
        let offset = entry.lfh_offset as usize;
        let corrupted = || ExtractionError::CorruptedLocalHeader { offset };

        if read_u32(self.buf, offset) != Ok(LocalFileHeader::SIGNATURE) {
            return Err(corrupted());
        }
        let header = LocalFileHeader::parse(self.buf, offset).map_err(|_| corrupted())?;

        let (compressed_size, uncompressed_size) =
            if header.has_data_descriptor() && header.compressed_size == 0 {
                (entry.compressed_size, entry.uncompressed_size)
            } else {
                (header.compressed_size, header.uncompressed_size)
            };

        let data = slice(self.buf, header.data_offset(), compressed_size as usize)
            .map_err(|_| corrupted())?;

        Ok(LocalEntry {
            header,
            data,
            uncompressed_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::fixture::ZipBuilder;

    const CANDIDATES: [&str; 2] = ["thumbnails/Thumbnail.png", "Thumbnail.png"];

    #[test]
    fn tiny_buffer_is_too_small() {
        let err = ZipParser::new(&[0u8; 21]).find_eocd().unwrap_err();
        assert!(matches!(err, ExtractionError::ArchiveTooSmall { len: 21 }));
    }

    #[test]
    fn empty_archive_has_eocd_at_start() {
        let bytes = ZipBuilder::new().build();
        assert_eq!(bytes.len(), EndOfCentralDirectory::SIZE);
        let (eocd, offset) = ZipParser::new(&bytes).find_eocd().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(eocd.total_entries, 0);
    }

    #[test]
    fn finds_eocd_behind_comment() {
        let bytes = ZipBuilder::new()
            .stored("a.txt", b"hello")
            .comment(b"a trailing comment")
            .build();
        let (eocd, offset) = ZipParser::new(&bytes).find_eocd().unwrap();
        assert_eq!(eocd.total_entries, 1);
        assert_eq!(offset + EndOfCentralDirectory::SIZE + 18, bytes.len());
    }

    #[test]
    fn signature_inside_comment_is_skipped() {
        let mut comment = b"xx".to_vec();
        comment.extend_from_slice(&EndOfCentralDirectory::SIGNATURE.to_le_bytes());
        comment.extend_from_slice(&[0u8; 24]);
        let bytes = ZipBuilder::new()
            .stored("Thumbnail.png", b"png")
            .comment(&comment)
            .build();

        let parser = ZipParser::new(&bytes);
        let (eocd, offset) = parser.find_eocd().unwrap();
        assert_eq!(eocd.comment_len as usize, comment.len());
        assert_eq!(offset, bytes.len() - comment.len() - EndOfCentralDirectory::SIZE);
        assert!(parser.find_entry(&eocd, &CANDIDATES).is_ok());
    }

    #[test]
    fn trailing_junk_falls_back_to_last_signature() {
        let mut bytes = ZipBuilder::new().stored("Thumbnail.png", b"png").build();
        let real = bytes.len() - EndOfCentralDirectory::SIZE;
        bytes.extend_from_slice(b"junk appended by a downloader");

        let (eocd, offset) = ZipParser::new(&bytes).find_eocd().unwrap();
        assert_eq!(offset, real);
        assert_eq!(eocd.total_entries, 1);
    }

    #[test]
    fn missing_signature_is_not_found() {
        let mut bytes = ZipBuilder::new().stored("Thumbnail.png", b"png").build();
        let at = bytes.len() - EndOfCentralDirectory::SIZE;
        bytes[at] = b'X';
        let err = ZipParser::new(&bytes).find_eocd().unwrap_err();
        assert!(matches!(err, ExtractionError::EndOfCentralDirectoryNotFound));
    }

    #[test]
    fn candidate_priority_beats_directory_order() {
        let bytes = ZipBuilder::new()
            .stored("Thumbnail.png", b"bare")
            .stored("thumbnails/Thumbnail.png", b"namespaced")
            .build();
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();

        let entry = parser.find_entry(&eocd, &CANDIDATES).unwrap();
        assert_eq!(entry.file_name, b"thumbnails/Thumbnail.png");

        let entry = parser.find_entry(&eocd, &["Thumbnail.png"]).unwrap();
        assert_eq!(entry.file_name, b"Thumbnail.png");
    }

    #[test]
    fn names_match_exactly() {
        let bytes = ZipBuilder::new()
            .stored("thumbnail.png", b"lower")
            .stored("Thumbnail.png.bak", b"suffix")
            .stored("x/Thumbnail.png", b"nested")
            .build();
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let err = parser.find_entry(&eocd, &CANDIDATES).unwrap_err();
        assert!(err.is_missing_entry());
    }

    #[test]
    fn broken_directory_chain_is_corrupted() {
        let mut bytes = ZipBuilder::new()
            .stored("a.txt", b"a")
            .stored("Thumbnail.png", b"png")
            .build();
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let second = eocd.cd_offset as usize + CentralDirectoryEntry::SIZE + "a.txt".len();

        bytes[second] = 0;
        let parser = ZipParser::new(&bytes);
        let err = parser.find_entry(&eocd, &CANDIDATES).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::CorruptedCentralDirectory { offset } if offset == second
        ));
    }

    #[test]
    fn directory_offset_out_of_range_is_corrupted() {
        let bytes = ZipBuilder::new().stored("Thumbnail.png", b"png").build();
        let parser = ZipParser::new(&bytes);
        let (mut eocd, _) = parser.find_eocd().unwrap();
        eocd.cd_offset = bytes.len() as u32 + 10;
        let err = parser.find_entry(&eocd, &CANDIDATES).unwrap_err();
        assert!(matches!(err, ExtractionError::CorruptedCentralDirectory { .. }));
    }

    #[test]
    fn slices_local_payload() {
        let bytes = ZipBuilder::new()
            .stored("a.txt", b"first")
            .stored("Thumbnail.png", b"payload")
            .build();
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let entry = parser.find_entry(&eocd, &CANDIDATES).unwrap();
        let local = parser.read_local_entry(&entry).unwrap();

        assert_eq!(local.data, b"payload");
        assert_eq!(local.uncompressed_size, 7);
        assert_eq!(local.header.compression_method, CompressionMethod::Stored);
    }

    #[test]
    fn local_header_signature_mismatch() {
        let mut bytes = ZipBuilder::new().stored("Thumbnail.png", b"payload").build();
        bytes[0] = 0;
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let entry = parser.find_entry(&eocd, &CANDIDATES).unwrap();
        let err = parser.read_local_entry(&entry).unwrap_err();
        assert!(matches!(err, ExtractionError::CorruptedLocalHeader { offset: 0 }));
    }

    #[test]
    fn oversized_local_payload_is_corrupted() {
        let mut bytes = ZipBuilder::new().stored("Thumbnail.png", b"payload").build();
        // Local compressed size field.
        bytes[18..22].copy_from_slice(&u32::MAX.to_le_bytes());
        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let entry = parser.find_entry(&eocd, &CANDIDATES).unwrap();
        let err = parser.read_local_entry(&entry).unwrap_err();
        assert!(matches!(err, ExtractionError::CorruptedLocalHeader { .. }));
    }

    #[test]
    fn data_descriptor_uses_directory_sizes() {
        let mut bytes = ZipBuilder::new().stored("Thumbnail.png", b"payload").build();
        bytes[6..8].copy_from_slice(&FLAG_DATA_DESCRIPTOR.to_le_bytes());
        bytes[18..26].fill(0);

        let parser = ZipParser::new(&bytes);
        let (eocd, _) = parser.find_eocd().unwrap();
        let entry = parser.find_entry(&eocd, &CANDIDATES).unwrap();
        let local = parser.read_local_entry(&entry).unwrap();
        assert_eq!(local.data, b"payload");
        assert_eq!(local.uncompressed_size, 7);
    }
}
