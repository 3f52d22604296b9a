//! Image cropping against an absolute pixel rectangle.
//!
//! The batch applies one rectangle, drawn against the reference image, to
//! every image. Coordinates are therefore absolute pixels, not normalized:
//! the whole point is that every image is cut at the same pixel offsets.
//!
//! A rectangle that does not fit an image is an error, never clamped. Images
//! whose dimensions differ from the reference would otherwise produce crops
//! of unexpected sizes without the user noticing.

use super::TransformError;
use crate::decode::DecodedImage;
use crate::geometry::CropRect;

/// Crop an image to a pixel rectangle.
///
/// Edges are half-open: the output is `rect.width() x rect.height()` pixels,
/// reading rows `top..bottom` and columns `left..right` of the source.
///
/// # Errors
///
/// Returns [`TransformError::InvalidRect`] for a degenerate rectangle and
/// [`TransformError::OutOfBounds`] when the rectangle extends past the image.
///
/// # Example
///
/// ```ignore
/// use batchcrop_core::decode::DecodedImage;
/// use batchcrop_core::geometry::CropRect;
/// use batchcrop_core::transform::apply_crop;
///
/// let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let cropped = apply_crop(&image, &CropRect::new(10, 10, 60, 60)).unwrap();
/// assert_eq!(cropped.width, 50);
/// assert_eq!(cropped.height, 50);
/// ```
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> Result<DecodedImage, TransformError> {
    rect.validate().map_err(TransformError::InvalidRect)?;

    if rect.right > image.width || rect.bottom > image.height {
        return Err(TransformError::OutOfBounds {
            rect: *rect,
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: the full frame needs no copy loop.
    if rect.left == 0 && rect.top == 0 && rect.right == image.width && rect.bottom == image.height {
        return Ok(image.clone());
    }

    let out_width = rect.width();
    let out_height = rect.height();

    let src_stride = (image.width * 3) as usize;
    let row_bytes = (out_width * 3) as usize;

    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Each output row is a contiguous slice of the source row.
    for y in rect.top..rect.bottom {
        let row_start = y as usize * src_stride + (rect.left * 3) as usize;
        output.extend_from_slice(&image.pixels[row_start..row_start + row_bytes]);
    }

    Ok(DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
