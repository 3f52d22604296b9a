//! JPEG encoding via the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_raster, EncodeError};
use crate::format::OutputFormat;

/// Encode an RGB raster to JPEG bytes at the given quality (1-100).
///
/// Values outside the range are clamped rather than rejected; batch output
/// uses [`super::DEFAULT_JPEG_QUALITY`].
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_raster(pixels, width, height)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_carries_jpeg_markers() {
        let jpeg = encode_jpeg(&vec![130u8; 64 * 48 * 3], 64, 48, 90).unwrap();

        // SOI at the start, EOI at the end.
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_affects_size() {
        // A noisy image compresses differently at different qualities.
        let pixels: Vec<u8> = (0..100 * 100 * 3).map(|i| (i * 31 % 256) as u8).collect();

        let low_q = encode_jpeg(&pixels, 100, 100, 20).unwrap();
        let high_q = encode_jpeg(&pixels, 100, 100, 95).unwrap();

        assert!(high_q.len() > low_q.len());
    }

    #[test]
    fn test_out_of_range_quality_is_clamped() {
        let pixels = vec![130u8; 10 * 10 * 3];

        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_wrong_buffer_length_is_rejected() {
        let one_row_short = vec![130u8; 99 * 100 * 3];
        let one_row_long = vec![130u8; 101 * 100 * 3];

        assert!(matches!(
            encode_jpeg(&one_row_short, 100, 100, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
        assert!(matches!(
            encode_jpeg(&one_row_long, 100, 100, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_single_pixel_encodes() {
        let jpeg = encode_jpeg(&[255, 0, 0], 1, 1, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_round_trips_through_decode() {
        let jpeg = encode_jpeg(&vec![200u8; 20 * 10 * 3], 20, 10, 95).unwrap();

        let decoded = crate::decode::decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (20, 10));
    }
}
