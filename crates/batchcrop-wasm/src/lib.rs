//! Batchcrop WASM - WebAssembly bindings for Batchcrop
//!
//! This crate provides WASM bindings to expose the batchcrop-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG/JPEG, resize)
//! - `encode` - Image encoding bindings (single-image export)
//! - `transform` - Shared rotate+crop transform and preview bindings
//! - `geometry` - Rectangle/angle validation bindings
//! - `format` - Declared-media-type resolution binding
//! - `batch` - Batch job construction and execution bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsBatchJob, run_batch } from '@batchcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Decode the reference image
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const reference = decode_image(bytes);
//! console.log(`Reference ${reference.width}x${reference.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod decode;
mod encode;
mod format;
mod geometry;
mod transform;
mod types;

// Re-export public types
pub use batch::{run_batch, JsBatchJob, JsBatchResult};
pub use decode::{decode_image, resize, resize_to_fit};
pub use encode::{encode_jpeg_from_image, encode_png_from_image};
pub use format::resolve_format;
pub use geometry::{validate_angle, validate_rect};
pub use transform::{apply_transform, preview_transform};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
