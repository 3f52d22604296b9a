//! Image encoding WASM bindings.
//!
//! This module exposes the batchcrop-core encoders to JavaScript, for
//! callers that export a single transformed image outside a batch run.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_from_image, encode_jpeg_from_image } from '@batchcrop/wasm';
//!
//! const png = encode_png_from_image(image);
//! const jpeg = encode_jpeg_from_image(image, 90);
//! ```

use crate::types::JsImage;
use batchcrop_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsImage to PNG bytes.
///
/// PNG is lossless and has no quality knob.
///
/// # Errors
///
/// Returns an error if the image has zero dimensions or an inconsistent
/// pixel buffer.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png(&pixels, image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsImage to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The decoded image to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality,
///   recommended: 90)
///
/// # Errors
///
/// Returns an error if the image has zero dimensions or an inconsistent
/// pixel buffer.
///
/// # Example
///
/// ```typescript
/// const jpeg = encode_jpeg_from_image(image, 90);
/// const blob = new Blob([jpeg], { type: 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg(&pixels, image.width(), image.height(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
