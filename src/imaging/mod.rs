//! Image decoding and channel normalization.
//!
//! Every image entering the pipeline is decoded into an 8-bit 3-channel
//! [`RgbImage`]: grayscale inputs are expanded by channel replication and
//! alpha channels are dropped. No resizing happens here; each consumer
//! resizes to its own required dimensions.

mod error;

#[cfg(test)]
mod tests;

pub use error::DecodeError;

use std::path::Path;

use image::RgbImage;
use tracing::debug;

/// Decodes raw image bytes into a canonical 3-channel RGB image.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();

    debug!(
        width = rgb.width(),
        height = rgb.height(),
        "Decoded image"
    );

    Ok(rgb)
}

/// Decodes an image file into a canonical 3-channel RGB image.
pub fn decode_path(path: &Path) -> Result<RgbImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_bytes(&bytes)
}
