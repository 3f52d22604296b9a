//! Crop preview generation.
//!
//! The selection UI shows the shared transform applied to the reference
//! image, scaled down to display size, beside the coordinate readout. This
//! module produces that image: the same rotation and crop the batch will
//! run, followed by an aspect-preserving downscale.

use crate::decode::{resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::geometry::{CropRect, RotationAngle};
use crate::transform::{apply_transform, InterpolationFilter, TransformError};
use thiserror::Error;

/// Default longest display edge for the preview panel.
pub const PREVIEW_MAX_EDGE: u32 = 1024;

/// Errors from preview generation.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Resize(#[from] DecodeError),
}

/// Apply the shared transform to the reference image and scale the result
/// for display.
///
/// The transform stage is identical to what [`crate::batch::run`] applies to
/// every batch item, so the preview is an honest rendition of the output
/// (before downscaling). Uses bilinear interpolation throughout; previews
/// are redrawn on every slider move and favor speed over export quality.
///
/// # Arguments
///
/// * `image` - The decoded reference image
/// * `angle` - Shared rotation angle
/// * `rect` - Shared crop rectangle, in post-rotation coordinates
/// * `max_edge` - Longest edge of the preview; the crop is never upscaled
///
/// # Errors
///
/// Propagates transform failures (degenerate or out-of-bounds rectangle) and
/// rejects a zero `max_edge`.
pub fn preview_transform(
    image: &DecodedImage,
    angle: RotationAngle,
    rect: &CropRect,
    max_edge: u32,
) -> Result<DecodedImage, PreviewError> {
    let cropped = apply_transform(image, angle, rect, InterpolationFilter::Bilinear)?;
    let scaled = resize_to_fit(&cropped, max_edge, FilterType::Bilinear)?;
    Ok(scaled)
}
