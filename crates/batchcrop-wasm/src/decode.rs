//! Image decoding WASM bindings.
//!
//! This module exposes the batchcrop-core decoding functions to JavaScript:
//! decoding uploaded bytes into a [`JsImage`] and resizing for display.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@batchcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const display = resize_to_fit(image, 1024, 1); // Bilinear filter
//! console.log(`Reference: ${display.width}x${display.height}`);
//! ```

use crate::types::{filter_from_u8, JsImage};
use batchcrop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode uploaded image bytes (PNG or JPEG).
///
/// The container format is sniffed from the bytes; EXIF orientation is
/// applied automatically so the image appears the way the user shot it.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsImage` containing the decoded RGB pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable PNG or JPEG.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - Source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Filter type: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize(image: &JsImage, width: u32, height: u32, filter: u8) -> Result<JsImage, JsValue> {
    let src = image.to_decoded();
    decode::resize(&src, width, height, filter_from_u8(filter))
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to fit within a maximum edge length, preserving aspect
/// ratio. Images already within the limit are returned unchanged.
///
/// # Arguments
///
/// * `image` - Source image
/// * `max_edge` - Maximum length of the longest edge in pixels
/// * `filter` - Filter type: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize_to_fit(image: &JsImage, max_edge: u32, filter: u8) -> Result<JsImage, JsValue> {
    let src = image.to_decoded();
    decode::resize_to_fit(&src, max_edge, filter_from_u8(filter))
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes_errors() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_to_fit_small_image_unchanged() {
        let img = JsImage::new(10, 10, vec![0u8; 10 * 10 * 3]);
        let result = resize_to_fit(&img, 100, 1).unwrap();
        assert_eq!(result.width(), 10);
        assert_eq!(result.height(), 10);
    }

    #[wasm_bindgen_test]
    fn test_resize_exact() {
        let img = JsImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        let result = resize(&img, 50, 25, 1).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 25);
    }
}
