//! Downscaling for preview display.
//!
//! The preview panel shows the transformed reference image at display size;
//! these helpers shrink a [`DecodedImage`] without touching the original.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact target dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero, or
/// `DecodeError::CorruptedFile` if the source pixel buffer is inconsistent.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Shrink an image so that its longest edge is at most `max_edge`.
///
/// Aspect ratio is preserved and the image is never upscaled: anything that
/// already fits comes back unchanged.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let longest = image.width.max(image.height);
    if longest <= max_edge {
        return Ok(image.clone());
    }

    let (fit_width, fit_height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, fit_width, fit_height, filter)
}

/// Scale both dimensions so the longest equals `max_edge`.
///
/// The shorter edge is rounded to nearest but never below 1, so extreme
/// aspect ratios still produce a valid raster.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = f64::from(max_edge) / f64::from(width.max(height));
    let scaled_width = (f64::from(width) * scale).round() as u32;
    let scaled_height = (f64::from(height) * scale).round() as u32;

    (scaled_width.max(1), scaled_height.max(1))
}
