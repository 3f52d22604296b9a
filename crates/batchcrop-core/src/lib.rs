//! Batchcrop Core - Batch image cropping library
//!
//! This crate provides the processing core of Batchcrop: the user selects
//! one crop rectangle and rotation angle against a reference image, and the
//! batch processor applies that same transform to every uploaded image,
//! packing the results into a downloadable ZIP archive.
//!
//! # Pipeline
//!
//! For each uploaded item, in upload order:
//!
//! 1. [`decode`] - sniff and decode the bytes (PNG/JPEG), correcting EXIF
//!    orientation
//! 2. [`transform`] - rotate by the shared angle (canvas expanded), then crop
//!    the shared rectangle
//! 3. [`format`] - resolve the output encoding from the item's declared
//!    media type
//! 4. [`encode`] - re-encode the transformed raster
//! 5. [`archive`] - pack all successes into one ZIP buffer
//!
//! Per-item failures are recorded and reported in aggregate; they never
//! abort the batch. Only an invalid shared rectangle is fatal.
//!
//! The crate is pure and synchronous: no UI, no network, no filesystem
//! assumptions. All inputs and outputs are in-memory buffers, which is what
//! lets the same code run inside a Web Worker via `batchcrop-wasm`.

pub mod archive;
pub mod batch;
pub mod decode;
pub mod encode;
pub mod format;
pub mod geometry;
pub mod preview;
pub mod transform;

pub use archive::{write_archive, ArchiveEntry, ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME};
pub use batch::{run, run_to_archive, run_with_progress, BatchJob, BatchOutcome, BatchProgress};
pub use decode::{decode_image, DecodedImage};
pub use encode::{encode_image, DEFAULT_JPEG_QUALITY};
pub use format::{resolve_format, OutputFormat};
pub use geometry::{CropRect, GeometryError, RotationAngle};
pub use transform::{apply_transform, compute_rotated_bounds, InterpolationFilter, TransformError};
