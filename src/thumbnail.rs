//! The preview entry point: archive bytes in, thumbnail bitmap out.

use image::DynamicImage;

use crate::bitmap;
use crate::config::{ExtractConfig, MaxSize};
use crate::error::Result;
use crate::zip::{extract_named_entry, extract_named_entry_with_limits};

/// Where ZIP-based documents keep their preview image, in lookup order.
pub const THUMBNAIL_CANDIDATES: [&str; 2] = ["thumbnails/Thumbnail.png", "Thumbnail.png"];

/// Extract the first of `candidates` from `archive` and decode it, scaling
/// into `max_size` when one is given.
pub fn extract_entry<S: AsRef<str>>(
    archive: &[u8],
    candidates: &[S],
    max_size: Option<MaxSize>,
) -> Result<DynamicImage> {
    let bytes = extract_named_entry(archive, candidates)?;
    bitmap::materialize(&bytes, max_size)
}

/// [`extract_entry`] driven by an [`ExtractConfig`].
pub fn extract_thumbnail(archive: &[u8], config: &ExtractConfig) -> Result<DynamicImage> {
    let bytes = extract_named_entry_with_limits(archive, &config.candidates, &config.limits)?;
    bitmap::materialize(&bytes, config.max_size)
}
