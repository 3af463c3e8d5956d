//! Decoding extracted bytes into a bitmap and fitting it into a box.

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

use crate::config::MaxSize;
use crate::error::{ExtractionError, Result};

/// Largest canvas `scale_to_fit` will allocate, in bytes of RGBA pixels.
const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Decode an encoded image (PNG) into a bitmap.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(ExtractionError::InvalidImageData("empty entry".to_string()));
    }
    image::load_from_memory(bytes).map_err(|e| ExtractionError::InvalidImageData(e.to_string()))
}

/// Decode `bytes` and, when `max_size` is given, scale the result into it.
pub fn materialize(bytes: &[u8], max_size: Option<MaxSize>) -> Result<DynamicImage> {
    let image = decode(bytes)?;
    match max_size {
        Some(max) => scale_to_fit(&image, max),
        None => Ok(image),
    }
}

/// Target dimensions for `width`x`height` uniformly scaled by the smaller of
/// the two axis ratios against `max`.
///
/// The ratio is applied as-is, so an image smaller than `max` grows until one
/// side touches the box.
pub fn fitted_dimensions(width: u32, height: u32, max: MaxSize) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let scale = f64::min(
        max.width as f64 / width as f64,
        max.height as f64 / height as f64,
    );
    let w = (width as f64 * scale).round();
    let h = (height as f64 * scale).round();
    if w < 1.0 || h < 1.0 || w > u32::MAX as f64 || h > u32::MAX as f64 {
        return None;
    }
    Some((w as u32, h as u32))
}

/// Render `image` into a fresh canvas bounded by `max`, preserving aspect
/// ratio, with Lanczos resampling.
pub fn scale_to_fit(image: &DynamicImage, max: MaxSize) -> Result<DynamicImage> {
    let failed = ExtractionError::ScalingFailed {
        width: max.width,
        height: max.height,
    };
    let (width, height) = fitted_dimensions(image.width(), image.height(), max).ok_or(failed)?;

    if (width as u64) * (height as u64) * 4 > MAX_CANVAS_BYTES {
        return Err(ExtractionError::ScalingFailed { width, height });
    }

    debug!(
        "scaling {}x{} to {width}x{height}",
        image.width(),
        image.height()
    );
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}
