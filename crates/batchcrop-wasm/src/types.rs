//! JavaScript-facing wrapper types.

use batchcrop_core::decode::{DecodedImage, FilterType};
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// The reference image lives as a `JsImage` for the whole selection session:
/// JavaScript decodes the upload once, then calls the transform and preview
/// bindings against the handle without copying pixels back and forth.
/// `pixels()` copies the buffer out as a `Uint8Array` when the UI needs to
/// draw it.
///
/// wasm-bindgen's finalizer releases the memory eventually; call `free()` to
/// drop a large image immediately.
#[wasm_bindgen]
pub struct JsImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsImage {
    /// Build an image from raw RGB bytes (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            inner: DecodedImage::new(width, height, pixels),
        }
    }

    /// Width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Size of the pixel buffer in bytes (`width * height * 3`).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Copy the RGB pixel data out as a `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Release the WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    /// Clone out the core image for the processing functions.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        self.inner.clone()
    }
}

/// Map the numeric filter the JS API uses onto [`FilterType`].
///
/// 0 is Nearest, 2 is Lanczos3, everything else (including the documented 1)
/// is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getters_reflect_inner_image() {
        let img = JsImage::new(100, 50, vec![0u8; 100 * 50 * 3]);

        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_pixels_copies_buffer() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8];
        let img = JsImage::new(2, 1, pixels.clone());

        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_decoded_round_trip() {
        let decoded = DecodedImage::new(20, 10, vec![7u8; 20 * 10 * 3]);
        let js_img = JsImage::from_decoded(decoded.clone());

        assert_eq!(js_img.to_decoded(), decoded);
    }

    #[test]
    fn test_filter_mapping() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
