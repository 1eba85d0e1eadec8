//! Gzip envelope detection and inflation.

use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::{self, Read};
use thiserror::Error;

/// First two bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// The blob carried the gzip magic but its stream could not be inflated.
#[derive(Debug, Error)]
#[error("corrupt gzip stream: {source}")]
pub struct DecompressionError {
    #[source]
    source: io::Error,
}

/// Returns true if the bytes start with the gzip magic.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Inflates a gzip blob, or returns the input untouched if it is not gzip.
///
/// # Errors
///
/// Returns `DecompressionError` only when the magic bytes match but the
/// stream is corrupt or truncated.
pub fn decompress(blob: &[u8]) -> Result<Cow<'_, [u8]>, DecompressionError> {
    if !is_gzip(blob) {
        return Ok(Cow::Borrowed(blob));
    }

    let mut decoder = GzDecoder::new(blob);
    let mut inflated = Vec::with_capacity(blob.len().saturating_mul(4));
    decoder
        .read_to_end(&mut inflated)
        .map_err(|source| DecompressionError { source })?;
    Ok(Cow::Owned(inflated))
}
