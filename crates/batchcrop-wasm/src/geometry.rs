//! WASM bindings for crop geometry validation.
//!
//! The selection UI calls these before enabling the batch button, so the
//! user sees the rejection reason next to the inputs instead of after a run.

use batchcrop_core::geometry::{CropRect, RotationAngle};
use wasm_bindgen::prelude::*;

/// Validate a candidate rectangle against the (post-rotation) reference
/// image size.
///
/// Checks the ordering rule (`right > left`, `bottom > top`) and that every
/// edge lies within `[0, width]` / `[0, height]`.
///
/// # Returns
///
/// Nothing on success; the human-readable reason as the error otherwise.
///
/// # Example (TypeScript)
///
/// ```typescript
/// try {
///   validate_rect(l, t, r, b, refWidth, refHeight);
///   enableBatchButton();
/// } catch (reason) {
///   showError(reason);
/// }
/// ```
#[wasm_bindgen]
pub fn validate_rect(
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    width: u32,
    height: u32,
) -> Result<(), JsValue> {
    CropRect::new(left, top, right, bottom)
        .validate_within(width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate a rotation angle is within `[-180, 180]`.
#[wasm_bindgen]
pub fn validate_angle(angle_degrees: i32) -> Result<(), JsValue> {
    RotationAngle::new(angle_degrees)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
