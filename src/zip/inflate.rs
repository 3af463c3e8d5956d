//! Turning an entry's stored payload back into its original bytes.

use std::borrow::Cow;

use flate2::{Decompress, FlushDecompress};
use log::{debug, warn};

use crate::error::{ExtractionError, Result};

use super::structures::CompressionMethod;

/// Decompress `data` according to `method`.
///
/// Stored payloads are handed back borrowed and untouched. Deflate payloads
/// are raw DEFLATE streams (no zlib or gzip wrapper), inflated into a buffer
/// sized from `uncompressed_size`; output past that size is dropped and a
/// shorter output is returned as-is.
pub fn decompress(
    data: &[u8],
    uncompressed_size: u32,
    method: CompressionMethod,
) -> Result<Cow<'_, [u8]>> {
    match method {
        CompressionMethod::Stored => Ok(Cow::Borrowed(data)),
        CompressionMethod::Deflate => inflate_raw(data, uncompressed_size).map(Cow::Owned),
        CompressionMethod::Unknown(code) => {
            Err(ExtractionError::UnsupportedCompressionMethod(code))
        }
    }
}

fn inflate_raw(data: &[u8], uncompressed_size: u32) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(uncompressed_size as usize);
    let mut decoder = Decompress::new(false);
    let status = decoder
        .decompress_vec(data, &mut out, FlushDecompress::Finish)
        .map_err(|e| ExtractionError::DecompressionFailed(e.to_string()))?;

    out.truncate(uncompressed_size as usize);

    if out.is_empty() {
        return Err(ExtractionError::DecompressionFailed(
            "decoder produced no output".to_string(),
        ));
    }
    if out.len() < uncompressed_size as usize {
        warn!(
            "inflated {} bytes, entry declared {uncompressed_size}",
            out.len()
        );
    }
    debug!("inflated {} -> {} bytes ({status:?})", data.len(), out.len());

    Ok(out)
}
