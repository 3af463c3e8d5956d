//! # thumbzip
//!
//! Pulls the embedded preview image out of ZIP-based documents.
//!
//! Many document formats are ZIP containers that carry a ready-made
//! thumbnail at `thumbnails/Thumbnail.png` or `Thumbnail.png`. This crate
//! finds that entry by reading the archive's own index directly from an
//! in-memory buffer, with no archive library involved, decompresses it and
//! decodes it into a bitmap.
//!
//! ## Features
//!
//! - Bounds-checked parsing of the End of Central Directory, Central
//!   Directory and Local File Headers from a byte slice
//! - STORED and DEFLATE entries
//! - Candidate names in priority order
//! - Optional aspect-preserving scaling of the decoded image
//! - Loading archives from local files or HTTP URLs (binary only)
//!
//! Every call is self-contained: nothing is cached and no state is shared
//! between calls, so concurrent callers need no coordination.
//!
//! ## Example
//!
//! ```no_run
//! use thumbzip::{MaxSize, THUMBNAIL_CANDIDATES, extract_entry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let archive = std::fs::read("drawing.sketch")?;
//!
//!     match extract_entry(&archive, &THUMBNAIL_CANDIDATES, Some(MaxSize::new(256, 256))) {
//!         Ok(image) => println!("{}x{}", image.width(), image.height()),
//!         Err(e) if e.is_missing_entry() => println!("no thumbnail"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod bitmap;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod thumbnail;
pub mod zip;

pub use cli::Cli;
pub use config::{ExtractConfig, Limits, MaxSize};
pub use error::{ExtractionError, Result};
pub use io::{ArchiveSource, HttpSource, LocalFileSource};
pub use thumbnail::{THUMBNAIL_CANDIDATES, extract_entry, extract_thumbnail};
pub use zip::{ZipExtractor, extract_named_entry};
