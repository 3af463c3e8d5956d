//! ZIP archive parsing and extraction.
//!
//! This module reads ZIP archives held entirely in memory, far enough to
//! pull out one named entry.
//!
//! ## Architecture
//!
//! - [`cursor`]: bounds-checked little-endian reads, used by everything below
//! - [`structures`]: fixed-layout records (EOCD, central and local headers)
//! - [`parser`]: locating the EOCD, scanning the Central Directory, slicing
//!   an entry's payload
//! - [`inflate`]: STORED passthrough and raw DEFLATE decompression
//! - [`extractor`]: the whole walk in one call
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No ZIP64 extensions
//! - STORED and DEFLATE only

pub mod cursor;
mod extractor;
mod inflate;
mod parser;
mod structures;

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
pub(crate) mod fixture;

pub use extractor::{ZipExtractor, extract_named_entry, extract_named_entry_with_limits};
pub use inflate::decompress;
pub use parser::{LocalEntry, ZipParser};
pub use structures::*;
