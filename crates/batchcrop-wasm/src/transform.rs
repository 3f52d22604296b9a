//! WASM bindings for the shared transform.
//!
//! These bindings drive the interactive side of the app: applying the
//! current rectangle and angle to the reference image, and producing the
//! downscaled preview panel.

use crate::types::JsImage;
use batchcrop_core::geometry::{CropRect, RotationAngle};
use batchcrop_core::preview::preview_transform as core_preview;
use batchcrop_core::transform::{apply_transform as core_transform, InterpolationFilter};
use wasm_bindgen::prelude::*;

fn parse_angle(angle_degrees: i32) -> Result<RotationAngle, JsValue> {
    RotationAngle::new(angle_degrees).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply the shared rotation and crop to an image.
///
/// The image is rotated clockwise by `angle_degrees` (canvas expanded so no
/// corners are clipped), then cropped to the rectangle, which is given in
/// post-rotation pixel coordinates.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Shared rotation angle in `[-180, 180]`, positive = clockwise
/// * `left`, `top`, `right`, `bottom` - Shared crop rectangle edges
/// * `use_lanczos` - Use high-quality Lanczos3 interpolation (slower),
///   otherwise bilinear
///
/// # Errors
///
/// Returns an error if the angle is out of range, the rectangle is
/// degenerate, or the rectangle exceeds the rotated image bounds.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Export-quality transform of one image
/// const out = apply_transform(image, -15, 10, 10, 60, 60, true);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn apply_transform(
    image: &JsImage,
    angle_degrees: i32,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    use_lanczos: bool,
) -> Result<JsImage, JsValue> {
    let angle = parse_angle(angle_degrees)?;
    let rect = CropRect::new(left, top, right, bottom);
    let filter = if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    };

    core_transform(&image.to_decoded(), angle, &rect, filter)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Produce the preview panel image: the shared transform applied to the
/// reference image, downscaled so its longest edge is at most `max_edge`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = preview_transform(reference, angle, l, t, r, b, 1024);
/// canvasCtx.putImageData(toImageData(preview), 0, 0);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn preview_transform(
    image: &JsImage,
    angle_degrees: i32,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    max_edge: u32,
) -> Result<JsImage, JsValue> {
    let angle = parse_angle(angle_degrees)?;
    let rect = CropRect::new(left, top, right, bottom);

    core_preview(&image.to_decoded(), angle, &rect, max_edge)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_image(width: u32, height: u32) -> JsImage {
        JsImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[wasm_bindgen_test]
    fn test_apply_transform_zero_angle() {
        let img = test_image(100, 100);
        let result = apply_transform(&img, 0, 10, 10, 60, 60, false).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 50);
    }

    #[wasm_bindgen_test]
    fn test_apply_transform_rejects_bad_angle() {
        let img = test_image(100, 100);
        assert!(apply_transform(&img, 270, 10, 10, 60, 60, false).is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_transform_rejects_out_of_bounds_rect() {
        let img = test_image(40, 40);
        assert!(apply_transform(&img, 0, 10, 10, 60, 60, false).is_err());
    }

    #[wasm_bindgen_test]
    fn test_preview_downscales() {
        let img = test_image(400, 300);
        let preview = preview_transform(&img, 0, 0, 0, 400, 300, 100).unwrap();
        assert_eq!(preview.width(), 100);
        assert_eq!(preview.height(), 75);
    }
}
