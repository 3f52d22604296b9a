//! Image transformation operations: rotation and cropping.
//!
//! The batch pipeline applies one shared transform to every image:
//!
//! 1. Rotation (the shared angle, canvas expanded so no corners are clipped)
//! 2. Crop (the shared rectangle, in post-rotation pixel coordinates)
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees; a positive [`RotationAngle`] rotates the
//!   image clockwise (the selection slider convention)
//! - Crop coordinates are absolute pixels with half-open edges, validated
//!   against the post-rotation image
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};

use crate::decode::DecodedImage;
use crate::geometry::{CropRect, GeometryError, RotationAngle};
use thiserror::Error;

/// Errors from applying the shared transform to a single image.
///
/// In a batch run these are per-item failures: they are recorded against the
/// item's name and never abort sibling items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The rectangle fails the ordering rule (`right > left`, `bottom > top`).
    #[error(transparent)]
    InvalidRect(GeometryError),

    /// The rectangle exceeds the post-rotation image bounds.
    ///
    /// This happens when an image's dimensions differ from the reference
    /// image the rectangle was drawn against. It is never clamped away: the
    /// item fails so the user learns the image did not match, instead of
    /// silently receiving a differently-sized crop.
    #[error("crop rectangle {rect} lies outside the {width}x{height} rotated image")]
    OutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },
}

/// Apply the shared rotation and crop to a single image.
///
/// If the angle is non-zero the image is first rotated clockwise by it (the
/// canvas expands to bound the rotated image), then the rectangle is cropped
/// from the result. Deterministic: the same image, angle, rectangle and
/// filter always produce the same output.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle` - Shared rotation angle, positive = clockwise
/// * `rect` - Shared crop rectangle in post-rotation pixel coordinates
/// * `filter` - Interpolation for non-right-angle rotations (Bilinear for
///   preview, Lanczos3 for export)
///
/// # Errors
///
/// Returns [`TransformError::OutOfBounds`] if the rectangle does not fit the
/// rotated image, or [`TransformError::InvalidRect`] if it is degenerate.
pub fn apply_transform(
    image: &DecodedImage,
    angle: RotationAngle,
    rect: &CropRect,
    filter: InterpolationFilter,
) -> Result<DecodedImage, TransformError> {
    if angle.is_zero() {
        return apply_crop(image, rect);
    }

    // The rotation primitive treats positive angles as counter-clockwise,
    // so a clockwise user angle is applied negated.
    let rotated = apply_rotation(image, -f64::from(angle.degrees()), filter);
    apply_crop(&rotated, rect)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
