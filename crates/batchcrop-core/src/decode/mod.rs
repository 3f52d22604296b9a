//! Image decoding pipeline for Batchcrop.
//!
//! This module provides functionality for:
//! - Decoding uploaded PNG/JPEG bytes into RGB rasters
//! - EXIF orientation correction
//! - Image resizing for the crop preview
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from Web Workers via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.
//!
//! Decoding sniffs the container format from the bytes themselves; the
//! declared media type of an upload is used only later, by the format
//! resolver, to pick the output encoding.
//!
//! # Examples
//!
//! ```ignore
//! use batchcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod resize;
mod types;
mod upload;

pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
pub use upload::{decode_image, decode_image_no_orientation, get_orientation};
