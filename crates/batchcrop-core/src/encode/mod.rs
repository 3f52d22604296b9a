//! Image encoding pipeline for Batchcrop.
//!
//! Transformed rasters are re-encoded in the format the format resolver
//! picked from the upload's declared media type: PNG or JPEG. Both encoders
//! validate dimensions and buffer length before touching the codec.
//!
//! # Examples
//!
//! ```ignore
//! use batchcrop_core::decode::DecodedImage;
//! use batchcrop_core::encode::encode_image;
//! use batchcrop_core::format::OutputFormat;
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
//! let bytes = encode_image(&image, OutputFormat::Png).unwrap();
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use crate::decode::DecodedImage;
use crate::format::OutputFormat;
use thiserror::Error;

/// Default JPEG export quality. High enough for archival use.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: OutputFormat, message: String },
}

/// Validate raster dimensions and buffer length before encoding.
fn validate_raster(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    Ok(())
}

/// Encode a decoded image in the given output format.
///
/// JPEG uses [`DEFAULT_JPEG_QUALITY`]; call [`encode_jpeg`] directly to pick
/// a different quality.
pub fn encode_image(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
        OutputFormat::Jpeg => encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            DEFAULT_JPEG_QUALITY,
        ),
    }
}
